//! Error types for the fallible edges of the game (config, storage, GPU setup)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid tuning: {0}")]
    Tuning(#[source] serde_json::Error),

    #[error("tuning value out of range: {0}")]
    TuningRange(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("renderer setup failed: {0}")]
    Renderer(String),

    #[error("browser environment: {0}")]
    Platform(String),
}

pub type GameResult<T> = Result<T, GameError>;
