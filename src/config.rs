//! Configuration options for the qrtag admin client

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Storage key the bearer token is persisted under
pub const DEFAULT_TOKEN_KEY: &str = "adminToken";

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Configuration options for the qrtag admin client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Durable storage key for the bearer token
    pub token_key: String,

    /// Directory the token file lives in; `None` keeps the token in memory only
    pub storage_dir: Option<PathBuf>,

    /// The request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            storage_dir: None,
            request_timeout: None,
        }
    }
}

impl ClientOptions {
    /// Read options from `QRTAG_API_URL`, `QRTAG_TOKEN_DIR` and `QRTAG_TOKEN_KEY`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("QRTAG_API_URL").map_err(|_| {
            Error::config("QRTAG_API_URL environment variable not found")
        })?;

        let mut options = Self::default().with_base_url(&base_url);
        if let Ok(dir) = std::env::var("QRTAG_TOKEN_DIR") {
            options = options.with_storage_dir(Some(PathBuf::from(dir)));
        }
        if let Ok(key) = std::env::var("QRTAG_TOKEN_KEY") {
            options = options.with_token_key(&key);
        }
        Ok(options)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the token storage key
    pub fn with_token_key(mut self, value: &str) -> Self {
        self.token_key = value.to_string();
        self
    }

    /// Set the token storage directory
    pub fn with_storage_dir(mut self, value: Option<PathBuf>) -> Self {
        self.storage_dir = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.token_key, "adminToken");
        assert!(options.storage_dir.is_none());
        assert!(options.request_timeout.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let options = ClientOptions::default().with_base_url("https://api.example.com/api/");
        assert_eq!(options.base_url, "https://api.example.com/api");
    }
}
