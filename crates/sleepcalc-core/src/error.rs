//! Core error types for sleepcalc-core.
//!
//! This module defines the error types using thiserror. Prediction
//! failures collapse into a single [`PredictionError`] kind at the
//! calculation boundary; the sub-causes are kept for logging only.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a model while it is being constructed or evaluated.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model artifact does not exist
    #[error("Model artifact not found at {path}")]
    NotFound { path: PathBuf },

    /// The model artifact could not be read
    #[error("Failed to read model artifact at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model artifact is not valid TOML or has the wrong shape
    #[error("Failed to parse model artifact: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// The artifact parsed but a coefficient is unusable
    #[error("Invalid model coefficient '{name}': {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    /// The input does not fit the model's feature space
    #[error("Invalid model input: {0}")]
    InvalidInput(String),

    /// Any other fault inside the model runtime
    #[error("Model runtime fault: {0}")]
    Runtime(String),
}

/// The single failure kind of a bedtime calculation.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// The model could not be constructed or failed to predict
    #[error("Model failed: {0}")]
    Model(#[from] ModelError),

    /// The model returned a value that is not a usable duration
    #[error("Model returned an unusable sleep duration: {0}")]
    InvalidOutput(f64),
}

impl PredictionError {
    /// Message shown to the user. Identical for every sub-cause.
    pub const USER_MESSAGE: &'static str = "Sorry, there was a problem calculating your bedtime.";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The configuration directory could not be created
    #[error("Failed to access data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors for calculation inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Hour or minute outside a valid clock reading
    #[error("Invalid wake time {hour:02}:{minute:02}")]
    InvalidWakeTime { hour: u32, minute: u32 },

    /// Wake time string not in HH:MM form
    #[error("Invalid wake time '{0}': expected HH:MM")]
    MalformedWakeTime(String),

    /// Sleep amount not a number
    #[error("Invalid sleep amount '{0}': expected a number of hours")]
    MalformedSleepAmount(String),

    /// Sleep amount outside [4, 12] or not a quarter-hour step
    #[error("Invalid sleep amount {0}: must be between 4 and 12 hours in 0.25 steps")]
    InvalidSleepAmount(f64),

    /// Coffee intake above the daily maximum
    #[error("Invalid coffee intake {0}: must be between 0 and 20 cups")]
    InvalidCoffeeIntake(u32),
}
