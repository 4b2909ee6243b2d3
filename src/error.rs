// Typed errors with thiserror. Surfaced to JS as `Error` objects by the bindings in lib.rs.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Malformed catalog payload: {0}")]
    MalformedCatalog(String),

    #[error("Catalog fetch failed: {0}")]
    Fetch(String),

    #[error("Movie API responded with HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => EngineError::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => EngineError::Fetch(err.to_string()),
        }
    }
}
