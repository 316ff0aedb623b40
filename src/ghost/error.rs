//! Error types for the Ghost Content API client.

/// Error from Content API operations.
#[derive(Debug, thiserror::Error)]
pub enum GhostError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Ghost API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GhostError {
    /// Whether this error means the resource is missing rather than unreachable
    pub fn is_not_found(&self) -> bool {
        matches!(self, GhostError::NotFound(_))
    }
}

impl From<serde_json::Error> for GhostError {
    fn from(e: serde_json::Error) -> Self {
        GhostError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GhostError>;
