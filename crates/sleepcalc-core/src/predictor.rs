//! Bedtime prediction.
//!
//! Converts the wake time into model features, asks a [`SleepModel`] how much
//! sleep is actually needed, and walks back from the wake time by that amount.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::input::{CoffeeIntake, PredictionInput, SleepAmount, WakeTime};
use crate::model::SleepModel;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

/// Clock style used when displaying a bedtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// "10:27 PM"
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// "22:27"
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl std::str::FromStr for ClockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "12h" | "12" => Ok(Self::TwelveHour),
            "24h" | "24" => Ok(Self::TwentyFourHour),
            other => Err(format!("unknown clock format '{other}': use 12h or 24h")),
        }
    }
}

/// Predicted bedtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bedtime {
    /// Time of day to go to bed
    pub time: NaiveTime,
    /// Days relative to the wake day (-1 means the evening before)
    pub day_offset: i64,
}

impl Bedtime {
    /// Short time, e.g. "10:27 PM".
    pub fn format_short(&self) -> String {
        self.format(ClockFormat::TwelveHour)
    }

    pub fn format(&self, clock: ClockFormat) -> String {
        match clock {
            ClockFormat::TwelveHour => self.time.format("%-I:%M %p").to_string(),
            ClockFormat::TwentyFourHour => self.time.format("%H:%M").to_string(),
        }
    }

    pub fn is_previous_day(&self) -> bool {
        self.day_offset < 0
    }
}

/// Subtract `actual_sleep` hours from the wake time, wrapping across midnight.
pub fn bedtime_from_wake(
    wake_time: WakeTime,
    actual_sleep: f64,
) -> Result<Bedtime, PredictionError> {
    if !actual_sleep.is_finite() {
        return Err(PredictionError::InvalidOutput(actual_sleep));
    }

    let wake_ms = i64::from(wake_time.seconds_since_midnight()) * 1000;
    let sleep_ms = (actual_sleep * MILLIS_PER_HOUR).round();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if !(i64::MIN as f64..i64::MAX as f64).contains(&sleep_ms) {
        return Err(PredictionError::InvalidOutput(actual_sleep));
    }
    let sleep_ms = sleep_ms as i64;
    let total_ms = wake_ms
        .checked_sub(sleep_ms)
        .ok_or(PredictionError::InvalidOutput(actual_sleep))?;

    let day_offset = total_ms.div_euclid(MILLIS_PER_DAY);
    let time_ms = total_ms.rem_euclid(MILLIS_PER_DAY);
    // rem_euclid keeps time_ms in [0, MILLIS_PER_DAY)
    let secs = (time_ms / 1000) as u32;
    let nanos = (time_ms % 1000) as u32 * 1_000_000;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .ok_or(PredictionError::InvalidOutput(actual_sleep))?;

    Ok(Bedtime { time, day_offset })
}

/// Predict the ideal bedtime for the given inputs.
pub fn predict_bedtime<M: SleepModel + ?Sized>(
    wake_time: WakeTime,
    sleep_amount: SleepAmount,
    coffee_intake: CoffeeIntake,
    model: &M,
) -> Result<Bedtime, PredictionError> {
    let input = PredictionInput::new(wake_time, sleep_amount, coffee_intake);
    let output = model.predict(&input)?;
    tracing::debug!(
        wake = input.wake,
        estimated_sleep = input.estimated_sleep,
        coffee = input.coffee,
        actual_sleep = output.actual_sleep,
        "model prediction"
    );
    bedtime_from_wake(wake_time, output.actual_sleep)
}

/// Predictor bound to one read-only model.
#[derive(Debug, Clone)]
pub struct BedtimePredictor<M> {
    model: M,
}

impl<M: SleepModel> BedtimePredictor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn predict(
        &self,
        wake_time: WakeTime,
        sleep_amount: SleepAmount,
        coffee_intake: CoffeeIntake,
    ) -> Result<Bedtime, PredictionError> {
        predict_bedtime(wake_time, sleep_amount, coffee_intake, &self.model)
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}
