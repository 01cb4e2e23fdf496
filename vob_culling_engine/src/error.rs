//! Error types for the vob culling engine
//!
//! This module defines the error types used throughout the engine,
//! including configuration, scene preparation and lifecycle misuse.

use std::fmt;

/// Result type for culling engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Culling engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Initialization failed (manager, trackers)
    InitializationFailed(String),

    /// Operation not valid in the current lifecycle state (e.g. after shutdown)
    InvalidState(String),

    /// Configuration values rejected by validation
    InvalidConfig(String),

    /// No renderable geometry could be resolved for an object
    GeometryNotFound(String),

    /// Configuration text could not be parsed
    ConfigParse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::GeometryNotFound(msg) => write!(f, "Geometry not found: {}", msg),
            Error::ConfigParse(msg) => write!(f, "Configuration parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
