//! Error types for the SmartMarks engine.

use crate::types::BookmarkId;
use thiserror::Error;

/// Failures reported by a bookmark store capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Bookmark store unavailable: {0}")]
    Unavailable(String),

    #[error("Bookmark not found: {0}")]
    NotFound(BookmarkId),

    #[error("Invalid bookmark operation: {0}")]
    InvalidOperation(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

/// Engine-level errors surfaced to callers of the analysis API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to analyze bookmarks: {0}")]
    AnalysisFailed(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Message channel error: {0}")]
    ChannelError(String),

    #[error("Event dispatcher is not running")]
    DispatcherStopped,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
