//! # Store Error Types
//!
//! Error types for storage and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / toml errors                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ├──► StoreState: logged with tracing, in-memory state kept       │
//! │       │                                                                 │
//! │       └──► Config loading / seed binary: returned to the caller        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage and configuration errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value is not valid JSON for the expected type.
    #[error("Malformed value under '{key}': {message}")]
    Malformed { key: String, message: String },

    /// A value could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The storage file exists but is not a JSON object of strings.
    #[error("Storage file is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

impl StoreError {
    pub fn malformed(key: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StoreError::Malformed {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
