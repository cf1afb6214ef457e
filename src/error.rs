//! Error types for navgrid

use thiserror::Error;

/// navgrid error type
///
/// An unreachable goal is not an error: path queries return `None` for it.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        NavError::Scenario(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
