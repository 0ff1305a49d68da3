//! Core error types for launchclock-core.
//!
//! A target in the past is not an error (it is the `Reached` state), so this
//! hierarchy only covers malformed input, configuration and theme loading.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for launchclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Theme lookup or loading errors
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Theme-specific errors.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// No built-in or custom theme with this id
    #[error("Unknown theme '{id}' (available: {available})")]
    NotFound { id: String, available: String },

    /// A theme file could not be parsed
    #[error("Failed to parse theme file {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// A theme record without an id
    #[error("Theme id must not be empty")]
    EmptyId,

    /// A palette entry is not a `#rrggbb` color
    #[error("Invalid color '{value}' for palette entry '{field}'")]
    InvalidColor { field: String, value: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The target could not be parsed as an instant
    #[error("Invalid target instant '{input}': expected RFC 3339 or YYYY-MM-DD[THH:MM:SS]")]
    InvalidTarget { input: String },

    /// The target falls outside the representable range
    #[error("Target instant out of range: {0}")]
    OutOfRange(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
