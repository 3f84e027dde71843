//! Error types for page loads

use thiserror::Error;

/// Every way a page load can fail. The UI treats all variants alike and only
/// shows the message.
#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("HTTP Error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Fetch task failed: {0}")]
    Task(String),
}

impl LoadFailure {
    pub fn status(code: reqwest::StatusCode) -> Self {
        Self::Status {
            status: code.as_u16(),
            reason: code.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadFailure>;
