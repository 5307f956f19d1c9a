use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("GPX parsing error: {0}")]
    GpxParsing(String),

    #[error("GPX writing error: {0}")]
    GpxWriting(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] object_store::Error),

    #[error("Run {0} not found")]
    RunNotFound(Uuid),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tracker event queue is full")]
    QueueFull,

    #[error("Tracker task is no longer running")]
    ChannelClosed,
}
