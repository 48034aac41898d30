//! Core error types for croissant-core.
//!
//! This module defines the error hierarchy using thiserror. Ledger errors
//! are rejections local to one operation and always leave the ledger
//! untouched; the other families cover the storage layer.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for croissant-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Ledger operation rejections
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Roster-related errors
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Roster file storage errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ledger operation rejections.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// A penalty for this date is already on the ledger
    #[error("A penalty is already recorded for {0}")]
    DuplicatePenaltyDate(NaiveDate),

    /// Reactivation requested but every slot is active
    #[error("No deactivated slot to reactivate")]
    NoDeactivatedSlot,
}

/// Roster-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// No person carries this identifier
    #[error("No person with id '{0}'")]
    UnknownPerson(String),

    /// The identifier is already taken
    #[error("A person with id '{0}' already exists")]
    DuplicatePerson(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No such configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from reading and writing the roster files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a roster file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a roster file
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not decode as a roster
    #[error("Malformed roster file {path}: {source}")]
    DecodeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
