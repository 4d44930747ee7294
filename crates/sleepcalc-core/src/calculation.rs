//! The calculation boundary.
//!
//! Loads the model, runs the predictor, and turns the result into what the
//! user sees. This is the only place a [`PredictionError`] is caught.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, PredictionError};
use crate::input::{CoffeeIntake, SleepAmount, WakeTime};
use crate::model::SleepModel;
use crate::predictor::{predict_bedtime, Bedtime, ClockFormat};

pub const SUCCESS_TITLE: &str = "Your ideal bedtime is...";
pub const ERROR_TITLE: &str = "Error";

/// One "Calculate" action.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub wake_time: WakeTime,
    pub sleep_amount: SleepAmount,
    pub coffee_intake: CoffeeIntake,
}

/// What the user is shown after a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub title: String,
    pub message: String,
    /// Present only when the prediction succeeded
    pub bedtime: Option<Bedtime>,
}

impl CalculationOutcome {
    pub fn is_success(&self) -> bool {
        self.bedtime.is_some()
    }

    fn success(bedtime: Bedtime, clock: ClockFormat) -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            message: bedtime.format(clock),
            bedtime: Some(bedtime),
        }
    }

    fn failure(err: &PredictionError) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: err.user_message().to_string(),
            bedtime: None,
        }
    }
}

/// Load a model and predict, without converting the error.
pub fn try_calculate<M, L>(
    request: &CalculationRequest,
    load: L,
) -> Result<Bedtime, PredictionError>
where
    M: SleepModel,
    L: FnOnce() -> Result<M, ModelError>,
{
    let model = load()?;
    predict_bedtime(
        request.wake_time,
        request.sleep_amount,
        request.coffee_intake,
        &model,
    )
}

/// Load a model, predict, and produce the user-facing outcome.
pub fn calculate<M, L>(
    request: &CalculationRequest,
    clock: ClockFormat,
    load: L,
) -> CalculationOutcome
where
    M: SleepModel,
    L: FnOnce() -> Result<M, ModelError>,
{
    match try_calculate(request, load) {
        Ok(bedtime) => CalculationOutcome::success(bedtime, clock),
        Err(err) => {
            tracing::warn!(error = %err, "bedtime calculation failed");
            CalculationOutcome::failure(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PredictionInput;
    use std::path::PathBuf;

    type Model = fn(&PredictionInput) -> Result<f64, ModelError>;

    fn eight_hours(_: &PredictionInput) -> Result<f64, ModelError> {
        Ok(8.0)
    }

    #[test]
    fn success_outcome() {
        let outcome = calculate(&CalculationRequest::default(), ClockFormat::TwelveHour, || {
            Ok(eight_hours as Model)
        });
        assert!(outcome.is_success());
        assert_eq!(outcome.title, SUCCESS_TITLE);
        assert_eq!(outcome.message, "11:00 PM");
    }

    #[test]
    fn success_outcome_24h() {
        let outcome = calculate(&CalculationRequest::default(), ClockFormat::TwentyFourHour, || {
            Ok(eight_hours as Model)
        });
        assert_eq!(outcome.message, "23:00");
    }

    #[test]
    fn load_failure_yields_generic_error() {
        let outcome = calculate(&CalculationRequest::default(), ClockFormat::TwelveHour, || {
            Err::<Model, _>(ModelError::NotFound {
                path: PathBuf::from("/missing/model.toml"),
            })
        });
        assert!(!outcome.is_success());
        assert_eq!(outcome.title, ERROR_TITLE);
        assert_eq!(outcome.message, PredictionError::USER_MESSAGE);
        assert!(outcome.bedtime.is_none());
    }

    #[test]
    fn nan_prediction_yields_generic_error() {
        fn nan(_: &PredictionInput) -> Result<f64, ModelError> {
            Ok(f64::NAN)
        }
        let outcome = calculate(&CalculationRequest::default(), ClockFormat::TwelveHour, || {
            Ok(nan as Model)
        });
        assert_eq!(outcome.message, PredictionError::USER_MESSAGE);
    }

    #[test]
    fn try_calculate_keeps_cause() {
        let err = try_calculate(&CalculationRequest::default(), || {
            Err::<Model, _>(ModelError::Runtime("bad".into()))
        })
        .unwrap_err();
        assert!(matches!(err, PredictionError::Model(ModelError::Runtime(_))));
    }
}
