//! Filter failure types

use thiserror::Error;

/// Error types for filter invocations
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{0}")]
    Failed(String),

    #[error("Failed to spawn filter program {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Filter exited with code {code}: {stderr}")]
    Exited { code: i32, stderr: String },

    #[error("Filter I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode filter params: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FilterError {
    pub fn failed(message: impl Into<String>) -> Self {
        FilterError::Failed(message.into())
    }
}
