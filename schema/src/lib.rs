// Pokemon Arena Schema - Shared type definitions
// This crate holds the static enums and data records shared by the arena
// engine: types and the type chart, stat and status kinds, and the move,
// item and species records the RON catalogues deserialize into.

pub use battle_data::*;
pub use item_types::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod item_types;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
