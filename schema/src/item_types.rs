use crate::StatType;
use serde::{Deserialize, Serialize};

/// What an item does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restore up to this much HP.
    Heal(u16),
    /// Clear any non-fainted status.
    Cure,
    /// Raise the current value of a stat for the rest of the battle.
    Boost { stat: StatType, amount: u16 },
    /// Restore PP to every known move.
    RestorePp(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    pub effect: ItemEffect,
    #[serde(default)]
    pub reusable: bool,
    #[serde(default)]
    pub sprite: String,
}
