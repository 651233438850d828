/// Error types for the game engine
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised at the collaborator boundary.
///
/// In-game rejections (a blocked move, a command while paused) are not errors;
/// commands report those by returning `false`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Horizontal move called with something other than -1 or 1
    #[error("Invalid direction: {0}. Expected -1 or 1")]
    InvalidDirection(i8),

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
