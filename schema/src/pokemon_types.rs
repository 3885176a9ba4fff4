use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The four possible outcomes of a type matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effectiveness {
    SuperEffective,
    Normal,
    NotVeryEffective,
    Immune,
}

impl Effectiveness {
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::SuperEffective => 2.0,
            Effectiveness::Normal => 1.0,
            Effectiveness::NotVeryEffective => 0.5,
            Effectiveness::Immune => 0.0,
        }
    }
}

impl PokemonType {
    pub const ALL: [PokemonType; 17] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
    ];

    /// Resolve the matchup of an attacking move type against a defending type.
    /// Every pair maps to exactly one `Effectiveness`.
    pub fn effectiveness(attacking: PokemonType, defending: PokemonType) -> Effectiveness {
        use Effectiveness::{Immune, NotVeryEffective as Weak, SuperEffective as Strong};
        use PokemonType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Ghost) => Immune,
            (Normal, Rock) | (Normal, Steel) => Weak,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => Weak,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => Strong,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => Weak,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => Strong,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => Weak,
            (Electric, Ground) => Immune,
            (Electric, Water) | (Electric, Flying) => Strong,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon)
            | (Grass, Steel) => Weak,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => Strong,

            // Ice
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => Weak,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => Strong,

            // Fighting
            (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => {
                Weak
            }
            (Fighting, Ghost) => Immune,
            (Fighting, Normal)
            | (Fighting, Ice)
            | (Fighting, Rock)
            | (Fighting, Dark)
            | (Fighting, Steel) => Strong,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => Weak,
            (Poison, Steel) => Immune,
            (Poison, Grass) => Strong,

            // Ground
            (Ground, Grass) | (Ground, Bug) => Weak,
            (Ground, Flying) => Immune,
            (Ground, Fire)
            | (Ground, Electric)
            | (Ground, Poison)
            | (Ground, Rock)
            | (Ground, Steel) => Strong,

            // Flying
            (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => Weak,
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => Strong,

            // Psychic
            (Psychic, Psychic) | (Psychic, Steel) => Weak,
            (Psychic, Dark) => Immune,
            (Psychic, Fighting) | (Psychic, Poison) => Strong,

            // Bug
            (Bug, Fire)
            | (Bug, Fighting)
            | (Bug, Poison)
            | (Bug, Flying)
            | (Bug, Ghost)
            | (Bug, Steel) => Weak,
            (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => Strong,

            // Rock
            (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => Weak,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => Strong,

            // Ghost
            (Ghost, Normal) => Immune,
            (Ghost, Dark) | (Ghost, Steel) => Weak,
            (Ghost, Psychic) | (Ghost, Ghost) => Strong,

            // Dragon
            (Dragon, Steel) => Weak,
            (Dragon, Dragon) => Strong,

            // Dark
            (Dark, Fighting) | (Dark, Dark) | (Dark, Steel) => Weak,
            (Dark, Psychic) | (Dark, Ghost) => Strong,

            // Steel
            (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => Weak,
            (Steel, Ice) | (Steel, Rock) => Strong,

            _ => Effectiveness::Normal,
        }
    }

    /// Damage multiplier for attacking type vs defending type.
    /// 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f64 {
        Self::effectiveness(attacking, defending).multiplier()
    }

    pub fn is_immune(attacking: PokemonType, defending: PokemonType) -> bool {
        Self::effectiveness(attacking, defending) == Effectiveness::Immune
    }

    /// Whether a move of `move_type` may be taught to a Pokemon of this type.
    /// Normal moves are universally teachable.
    pub fn can_learn(self, move_type: PokemonType) -> bool {
        move_type == self || move_type == PokemonType::Normal
    }
}
