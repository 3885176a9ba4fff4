use thiserror::Error;

/// The closed set of rule violations a combatant can commit.
///
/// Construction and mutation return these directly; `OfficerJenny` turns the
/// same conditions into disqualification verdicts for live roster members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Move count outside [MIN_MOVES, MAX_MOVES]
    #[error("Invalid move total: {0}")]
    InvalidMoveTotal(String),
    /// Stat or move-point allocation is invalid
    #[error("Invalid Pokemon points: {0}")]
    InvalidPokemonPoints(String),
    /// Move/type mismatch or unrecognized type string
    #[error("Invalid type: {0}")]
    InvalidType(String),
    /// Negative or out-of-range stat value
    #[error("Invalid Pokemon values: {0}")]
    InvalidPokemonValues(String),
    /// Experience change that would decrease or go negative
    #[error("Invalid experience: {0}")]
    InvalidExp(String),
}

/// Errors raised while looking up catalogue data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Malformed catalogue data: {0}")]
    MalformedData(String),
}

/// Errors from adding a catalogue item by name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error(transparent)]
    Lookup(#[from] DataError),
    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

/// Errors related to battle preconditions and resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// A combatant entered the battle already fainted
    #[error("{0} is already fainted")]
    AlreadyFainted(String),
    /// A combatant failed inspection before the battle
    #[error("{name} failed inspection: {reason}")]
    FailedInspection { name: String, reason: String },
    /// Neither combatant fainted within the round limit
    #[error("battle still undecided after {0} rounds")]
    Stalemate(u32),
}

/// Errors from driving the arena's battle transition by hand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("a battle is already in progress")]
    BattleInProgress,
    #[error("no battle is in progress")]
    NoBattleInProgress,
    #[error("no roaming entity with id {0}")]
    UnknownEntity(u32),
    #[error("an entity with id {0} is already on the roster")]
    DuplicateEntity(u32),
    #[error("an entity cannot battle itself (id {0})")]
    SelfBattle(u32),
}

/// Errors raised while loading arena configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Type alias for Results using ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using ItemError
pub type ItemResult<T> = Result<T, ItemError>;

/// Type alias for Results using BattleEngineError
pub type BattleEngineResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using ArenaError
pub type ArenaResult<T> = Result<T, ArenaError>;
