use thiserror::Error;

use crate::model::Outcome;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cell ({x}, {y}) is outside the board")]
    CellOutOfBounds { x: usize, y: usize },
    #[error("Game already ended in {0}, no new moves are accepted")]
    GameAlreadyEnded(Outcome),
    #[error("Game is paused")]
    GamePaused,
    #[error("No game session with id {0}")]
    SessionNotFound(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
