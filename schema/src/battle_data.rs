use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// The eight numeric stats tracked for every combatant.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Evasion,
    Accuracy,
}

impl StatType {
    pub const ALL: [StatType; 8] = [
        StatType::Hp,
        StatType::Attack,
        StatType::Defense,
        StatType::SpecialAttack,
        StatType::SpecialDefense,
        StatType::Speed,
        StatType::Evasion,
        StatType::Accuracy,
    ];

    pub fn index(self) -> usize {
        match self {
            StatType::Hp => 0,
            StatType::Attack => 1,
            StatType::Defense => 2,
            StatType::SpecialAttack => 3,
            StatType::SpecialDefense => 4,
            StatType::Speed => 5,
            StatType::Evasion => 6,
            StatType::Accuracy => 7,
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Hp => "HP",
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::SpecialAttack => "Special Attack",
            StatType::SpecialDefense => "Special Defense",
            StatType::Speed => "Speed",
            StatType::Evasion => "evasiveness",
            StatType::Accuracy => "accuracy",
        };
        write!(f, "{}", display_name)
    }
}

/// Exclusive status condition of a combatant. `Fainted` is terminal.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum StatusType {
    #[default]
    Normal,
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
    Bound,
    Confusion,
    Fainted,
}

impl StatusType {
    /// Statuses that roll for recovery at the start of the afflicted combatant's action.
    pub fn recovers_over_time(self) -> bool {
        matches!(
            self,
            StatusType::Freeze
                | StatusType::Sleep
                | StatusType::Paralysis
                | StatusType::Bound
                | StatusType::Confusion
        )
    }

    /// Statuses that deal damage at the end of every turn.
    pub fn ticks_damage(self) -> bool {
        matches!(self, StatusType::Burn | StatusType::Poison)
    }

    pub fn is_afflicted(self) -> bool {
        !matches!(self, StatusType::Normal | StatusType::Fainted)
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusType::Normal => "normal",
            StatusType::Burn => "burn",
            StatusType::Freeze => "freeze",
            StatusType::Paralysis => "paralysis",
            StatusType::Poison => "poison",
            StatusType::Sleep => "sleep",
            StatusType::Bound => "bind",
            StatusType::Confusion => "confusion",
            StatusType::Fainted => "faint",
        };
        write!(f, "{}", display_name)
    }
}
