//! Error types for backend communication.

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur talking to the school backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend rejected the request: {0}")]
    Backend(String),

    #[error("Could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Could not read punch photo {path}: {source}")]
    PhotoRead {
        path: String,
        source: std::io::Error,
    },
}
