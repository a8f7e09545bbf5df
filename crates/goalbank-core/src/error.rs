//! Core error types for goalbank-core.
//!
//! Every fallible engine operation returns [`CoreError`]. Rejected inputs
//! never leave partial state behind: the engine validates before it mutates.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for goalbank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An id that is not present in the session
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Kind of entity referenced by a [`CoreError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Goal,
    Product,
    Entity,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::Goal => "Goal",
            EntityKind::Product => "Product",
            EntityKind::Entity => "Entity",
        };
        f.write_str(s)
    }
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field left blank
    #[error("'{0}' must not be empty")]
    EmptyField(String),

    /// Zero amount where a positive one is required
    #[error("'{field}' must be a positive amount")]
    NonPositiveAmount { field: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Spending more than what is left in the budget
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key that does not exist in the config tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value that cannot be parsed into the key's type
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
