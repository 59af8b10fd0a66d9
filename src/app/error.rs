use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::StoryId;

#[derive(Error, Debug)]
pub enum RippleError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Item not found: {0}")]
    ItemNotFound(StoryId),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl RippleError {
    /// True for failures of the request itself rather than of its body.
    pub fn is_network(&self) -> bool {
        matches!(self, RippleError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, RippleError>;
