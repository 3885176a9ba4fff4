use crate::{PokemonType, StatusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
}

/// Chance for a move to inflict a status on the defender after it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfliction {
    pub status: StatusType,
    /// Percent chance, 0-100.
    pub chance: u8,
}

/// Static description of a move as it appears in the move catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u16,
    /// Percent, 0-100.
    pub accuracy: u8,
    pub max_pp: u8,
    #[serde(default)]
    pub infliction: Option<StatusInfliction>,
    #[serde(default)]
    pub sound: String,
}

impl MoveData {
    /// Fallback used when a combatant has no PP left on any move.
    pub fn struggle() -> Self {
        MoveData {
            name: "Struggle".to_string(),
            move_type: PokemonType::Normal,
            category: MoveCategory::Physical,
            power: 50,
            accuracy: 100,
            max_pp: 1,
            infliction: None,
            sound: String::new(),
        }
    }
}
