//! Crate-wide error definitions.

use thiserror::Error;

/// Errors produced while composing or applying remote configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Path string could not be decoded into keys.
    #[error("invalid config path '{0}': empty segment")]
    InvalidPath(String),

    /// Port argument could not be normalized to a port list.
    #[error("unsupported port value: {0}")]
    UnsupportedPortType(String),

    /// Read or delete addressed a path or ID the remote tree does not hold.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network failure or non-success status from the admin endpoint.
    #[error("admin endpoint error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport {
        /// HTTP status code, when a response was received at all.
        status: Option<u16>,
        /// Remote-supplied error message, or a transport description.
        message: String,
    },

    /// Entity could not be serialized to or from the wire format.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl Error {
    /// True when the error is the remote tree reporting an absent entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type for admin client operations.
pub type Result<T> = std::result::Result<T, Error>;
