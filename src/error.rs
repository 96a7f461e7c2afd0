// src/error.rs
use thiserror::Error;

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Malformed time string or unexpected payload shape. Fatal for the record,
    /// recoverable for the game.
    #[error("malformed {what}: {value:?}")]
    Format { what: &'static str, value: String },

    /// Network or upstream failure. Never retried past the client's bounded retry.
    #[error("source unavailable: {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn format(what: &'static str, value: impl Into<String>) -> Self {
        ScrapeError::Format { what, value: value.into() }
    }

    pub fn unavailable(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::SourceUnavailable { url: url.into(), reason: reason.to_string() }
    }

    /// Whether a batch should keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScrapeError::Format { .. } => true,
            ScrapeError::SourceUnavailable { .. } => true,
            ScrapeError::Payload(_) => true,
            ScrapeError::InvalidArgument(_) => false,
            ScrapeError::Io(_) => false,
        }
    }
}
