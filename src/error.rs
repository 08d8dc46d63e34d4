use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A movement delta that is not one of the four unit directions
    #[error("invalid direction delta ({dx}, {dy})")]
    InvalidDirection { dx: i32, dy: i32 },

    /// No free cell is left on the board
    #[error("no available position on the grid")]
    NoAvailablePosition,

    /// Configuration rejected at construction time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
