use crate::domain::time::TimeParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid calendar event: {0}")]
    InvalidEvent(String),
    #[error("Time parse error: {0}")]
    TimeParse(#[from] TimeParseError),
}
