//! Error types for the theme store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Theme name must not be empty")]
    EmptyName,

    #[error("Theme not found: {0}")]
    NotFound(String),

    #[error("Built-in theme cannot be removed: {0}")]
    BuiltinTheme(String),

    #[error("Invalid theme record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Failure while repairing a single theme record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    #[error("Theme record is not an object")]
    NotAnObject,

    #[error("Field `{0}` has an unexpected shape")]
    MalformedField(&'static str),
}
