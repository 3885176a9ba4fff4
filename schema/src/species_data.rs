use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn total(&self) -> u32 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
        .iter()
        .map(|&stat| stat as u32)
        .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionData {
    pub evolves_into: String,
    pub level: u8,
}

/// Data-only description of a species: everything needed to build a combatant of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDescriptor {
    pub pokedex_number: u16,
    pub name: String,
    pub pokemon_type: PokemonType,
    pub base_stats: BaseStats,
    /// Names of moves this species may learn, in learn order.
    pub move_pool: Vec<String>,
    pub height: f32,
    pub weight: f32,
    pub description: String,
    #[serde(default)]
    pub evolution: Option<EvolutionData>,
    #[serde(default)]
    pub sprite: String,
    #[serde(default)]
    pub cry: String,
}

impl SpeciesDescriptor {
    pub fn can_learn(&self, move_name: &str) -> bool {
        self.move_pool
            .iter()
            .any(|name| name.eq_ignore_ascii_case(move_name))
    }
}
