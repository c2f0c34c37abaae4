//! Error handling for the qrtag admin client

use std::fmt;
use thiserror::Error;

/// Message used when a failed response carries no `message` of its own
pub const GENERIC_FAILURE: &str = "Request failed";

/// Unified error type for the qrtag admin client
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (network unreachable, DNS, TLS...)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status or `success: false`
    #[error("{message}")]
    Backend {
        status: Option<u16>,
        message: String,
    },

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Durable token storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A required caller-supplied field was missing
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new backend error
    pub fn backend<T: fmt::Display>(status: Option<u16>, msg: T) -> Self {
        Error::Backend {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// HTTP status of a backend error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Backend { status, .. } => *status,
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type alias for qrtag admin operations
pub type Result<T> = std::result::Result<T, Error>;
