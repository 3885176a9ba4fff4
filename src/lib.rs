//! Pokemon Arena
//!
//! A tick-driven arena where roaming Pokemon collide and fight. Combatants are
//! audited before every battle, battles resolve to completion in a single
//! call, and winners rejoin the roam pool with their rewards.

// --- MODULE DECLARATIONS ---
pub mod arena;
pub mod battle;
pub mod config;
pub mod errors;
pub mod items;
pub mod move_data;
pub mod moves;
pub mod pokemon;
pub mod progression;
pub mod species;
pub mod stats;
pub mod validation;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, Effectiveness, EvolutionData, ItemData, ItemEffect, MoveCategory, MoveData,
    PokemonType, SpeciesDescriptor, StatType, StatusInfliction, StatusType,
};

// --- From this crate's modules (`src/`) ---

// Arena and scene binding.
pub use arena::{
    ArenaController, ArenaState, BattleOutcome, NoopObserver, Position, RecordingObserver,
    SceneObserver, SceneTransition, TickReport, Velocity,
};
pub use config::ArenaConfig;

// Battle resolution.
pub use battle::engine::BattleEngine;
pub use battle::state::{BattleEvent, BattleFailure, BattlePair, BattleResult, EventBus, TurnRng};

// Combatants and their parts.
pub use items::ItemSet;
pub use moves::{MoveInstance, MoveSet};
pub use pokemon::{Combatant, CombatantConfig, StatValues};
pub use progression::{Experience, RewardCalculator};
pub use stats::StatBlock;
pub use validation::{OfficerJenny, Verdict};

// Primary data access functions.
pub use move_data::{get_item_data, get_move_data};
pub use species::{all_species, get_species_data};

// Crate-specific error and result types.
pub use errors::{
    ArenaError, BattleEngineError, ConfigError, DataError, DataResult, ItemError, ItemResult,
    ValidationError, ValidationResult,
};
