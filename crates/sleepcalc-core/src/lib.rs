//! # SleepCalc Core Library
//!
//! This library provides the core logic for SleepCalc, a bedtime calculator.
//! Given a desired wake time, a desired amount of sleep and a daily coffee
//! intake, a pre-trained linear model predicts how much sleep is actually
//! needed, and the bedtime is the wake time minus that amount.
//!
//! ## Architecture
//!
//! - **Inputs**: range-checked wake time, sleep amount and coffee intake
//! - **Model**: a pluggable [`SleepModel`] seam, with a TOML-artifact-backed
//!   [`LinearSleepModel`] implementation
//! - **Predictor**: pure bedtime arithmetic that wraps across midnight
//! - **Calculation**: the boundary that converts failures into the message
//!   shown to the user
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`predict_bedtime`]: One prediction, `Result<Bedtime, PredictionError>`
//! - [`calculate`]: Load a model and produce a [`CalculationOutcome`]
//! - [`Config`]: Application configuration management

pub mod calculation;
pub mod error;
pub mod input;
pub mod model;
pub mod predictor;
pub mod storage;

pub use calculation::{calculate, try_calculate, CalculationOutcome, CalculationRequest};
pub use error::{ConfigError, ModelError, PredictionError, ValidationError};
pub use input::{CoffeeIntake, PredictionInput, PredictionOutput, SleepAmount, WakeTime};
pub use model::{Coefficients, LinearModelParams, LinearSleepModel, SleepModel};
pub use predictor::{bedtime_from_wake, predict_bedtime, Bedtime, BedtimePredictor, ClockFormat};
pub use storage::Config;
