//! Sleep prediction models.
//!
//! The trained regression is opaque to this crate. Anything that maps a
//! [`PredictionInput`] to a predicted sleep duration can stand in for it:
//! the TOML-backed [`LinearSleepModel`], or a plain closure.

mod linear;

pub use linear::{Coefficients, LinearModelParams, LinearSleepModel};

use crate::error::ModelError;
use crate::input::{PredictionInput, PredictionOutput};

/// A read-only predictor of how much sleep is actually needed.
pub trait SleepModel: Send + Sync {
    /// Predict actual sleep (in hours) for the given features.
    fn predict(&self, input: &PredictionInput) -> Result<PredictionOutput, ModelError>;
}

impl<F> SleepModel for F
where
    F: Fn(&PredictionInput) -> Result<f64, ModelError> + Send + Sync,
{
    fn predict(&self, input: &PredictionInput) -> Result<PredictionOutput, ModelError> {
        self(input).map(|actual_sleep| PredictionOutput { actual_sleep })
    }
}
