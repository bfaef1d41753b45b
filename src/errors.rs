//! # Error Types Module
//!
//! Structured errors for startup configuration and the products file.

use std::path::PathBuf;

/// Startup configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    MissingVar(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{name} not set"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failures reading or writing the persisted product set
#[derive(Debug)]
pub enum StorageError {
    /// The file could not be read
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was read but does not hold a valid product list
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The product list could not be serialized
    Encode { source: serde_json::Error },
    /// The file could not be written
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Every id up to `i64::MAX` is taken, so no new product can be added
    IdSpaceExhausted,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Read { path, source } => {
                write!(f, "Failed to read {}: {source}", path.display())
            }
            StorageError::Malformed { path, source } => {
                write!(f, "Malformed product data in {}: {source}", path.display())
            }
            StorageError::Encode { source } => write!(f, "Failed to encode products: {source}"),
            StorageError::Write { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
            StorageError::IdSpaceExhausted => write!(f, "No product id left above {}", i64::MAX),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Read { source, .. } | StorageError::Write { source, .. } => Some(source),
            StorageError::Malformed { source, .. } | StorageError::Encode { source } => {
                Some(source)
            }
            StorageError::IdSpaceExhausted => None,
        }
    }
}
