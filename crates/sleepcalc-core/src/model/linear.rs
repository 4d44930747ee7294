//! Linear regression model backed by a TOML artifact.
//!
//! Formula: `actual_sleep = intercept + wake * c_wake + estimated_sleep * c_sleep + coffee * c_coffee`
//!
//! Artifact layout:
//!
//! ```toml
//! name = "SleepCalculator"
//! intercept = 1.5
//!
//! [coefficients]
//! wake = 0.0
//! estimated_sleep = 0.9
//! coffee = 0.1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SleepModel;
use crate::error::ModelError;
use crate::input::{PredictionInput, PredictionOutput};

/// Per-feature weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// Parameters read from a model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelParams {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Coefficients,
}

fn default_name() -> String {
    "SleepCalculator".into()
}

/// Linear sleep model.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSleepModel {
    params: LinearModelParams,
}

impl LinearSleepModel {
    /// Build a model from parameters, rejecting non-finite weights.
    pub fn new(params: LinearModelParams) -> Result<Self, ModelError> {
        let checks = [
            ("intercept", params.intercept),
            ("wake", params.coefficients.wake),
            ("estimated_sleep", params.coefficients.estimated_sleep),
            ("coffee", params.coefficients.coffee),
        ];
        if let Some((name, value)) = checks.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidCoefficient { name, value });
        }
        Ok(Self { params })
    }

    /// Parse an artifact from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        let params: LinearModelParams = toml::from_str(content)?;
        Self::new(params)
    }

    /// Load an artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] when the file does not exist, and a
    /// read, parse or coefficient error otherwise.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ModelError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let model = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            name = %model.params.name,
            "loaded sleep model artifact"
        );
        Ok(model)
    }

    pub fn params(&self) -> &LinearModelParams {
        &self.params
    }
}

impl SleepModel for LinearSleepModel {
    fn predict(&self, input: &PredictionInput) -> Result<PredictionOutput, ModelError> {
        let features = [input.wake, input.estimated_sleep, input.coffee];
        if features.iter().any(|f| !f.is_finite()) {
            return Err(ModelError::InvalidInput(format!("{input:?}")));
        }

        let c = &self.params.coefficients;
        let actual_sleep = self.params.intercept
            + c.wake * input.wake
            + c.estimated_sleep * input.estimated_sleep
            + c.coffee * input.coffee;

        Ok(PredictionOutput { actual_sleep })
    }
}
