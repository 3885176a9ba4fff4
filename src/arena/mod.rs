pub mod controller;
pub mod roster;
pub mod scene;

pub use controller::{ArenaController, ArenaState, BattleOutcome, BattleStart, TickReport};
pub use roster::{Bounds, Position, RosterEntry, Velocity};
pub use scene::{NoopObserver, RecordingObserver, SceneNotification, SceneObserver, SceneTransition};
