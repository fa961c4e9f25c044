//! Error types for the shift schedule engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can occur while loading configuration,
//! validating criteria, generating schedules, or pricing shifts.

use thiserror::Error;

/// The main error type for the shift schedule engine.
///
/// All fallible engine operations return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use shift_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/units.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/units.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value or named option was not recognised.
    ///
    /// Raised for unknown shift or rotation pattern names and for
    /// configuration tables that are internally inconsistent.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfiguration {
        /// The field or option that was invalid.
        field: String,
        /// A description of what made it invalid.
        message: String,
    },

    /// The unit type was not found in the configured pay bands.
    #[error("Unit type not found: {unit}")]
    UnitNotFound {
        /// The unit type that was not found.
        unit: String,
    },

    /// Scheduling criteria failed boundary validation.
    #[error("Invalid criteria field '{field}': {message}")]
    InvalidCriteria {
        /// The criteria field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
