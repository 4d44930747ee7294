//! Calculation inputs and the model's feature/label types.
//!
//! Each input type enforces its range on construction, so a value that
//! reaches the predictor is always valid.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: u32 = 60 * 60;

/// Desired wake time. Hour and minute only, no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WakeTime(NaiveTime);

impl WakeTime {
    /// Create a wake time from a clock reading.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or(ValidationError::InvalidWakeTime { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// `hour * 3600 + minute * 60`.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour() * SECONDS_PER_HOUR + self.minute() * 60
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for WakeTime {
    /// 07:00
    fn default() -> Self {
        Self(NaiveTime::MIN + chrono::TimeDelta::hours(7))
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WakeTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedWakeTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        if minute.len() != 2 {
            return Err(malformed());
        }
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for WakeTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WakeTime> for String {
    fn from(value: WakeTime) -> Self {
        value.to_string()
    }
}

/// Desired hours of sleep, 4 to 12 in quarter-hour steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.25;

    pub fn new(hours: f64) -> Result<Self, ValidationError> {
        let steps = hours / Self::STEP;
        let in_range = (Self::MIN..=Self::MAX).contains(&hours);
        if !in_range || steps.fract() != 0.0 {
            return Err(ValidationError::InvalidSleepAmount(hours));
        }
        Ok(Self(hours))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self(8.0)
    }
}

impl fmt::Display for SleepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SleepAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::MalformedSleepAmount(s.to_string()))?;
        Self::new(hours)
    }
}

impl TryFrom<f64> for SleepAmount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SleepAmount> for f64 {
    fn from(value: SleepAmount) -> Self {
        value.0
    }
}

/// Cups of coffee per day, 0 to 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CoffeeIntake(u32);

impl CoffeeIntake {
    pub const MAX: u32 = 20;

    pub fn new(cups: u32) -> Result<Self, ValidationError> {
        if cups > Self::MAX {
            return Err(ValidationError::InvalidCoffeeIntake(cups));
        }
        Ok(Self(cups))
    }

    pub fn cups(&self) -> u32 {
        self.0
    }

    /// Label with the noun inflected for count ("1 cup", "2 cups").
    pub fn label(&self) -> String {
        if self.0 == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.0)
        }
    }
}

impl Default for CoffeeIntake {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for CoffeeIntake {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoffeeIntake> for u32 {
    fn from(value: CoffeeIntake) -> Self {
        value.0
    }
}

/// Feature vector passed to a [`crate::model::SleepModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Wake time as seconds since midnight
    pub wake: f64,
    /// Desired sleep in hours
    pub estimated_sleep: f64,
    /// Daily coffee cups, widened from an integer
    pub coffee: f64,
}

impl PredictionInput {
    pub fn new(wake_time: WakeTime, sleep_amount: SleepAmount, coffee_intake: CoffeeIntake) -> Self {
        Self {
            wake: f64::from(wake_time.seconds_since_midnight()),
            estimated_sleep: sleep_amount.hours(),
            coffee: f64::from(coffee_intake.cups()),
        }
    }
}

/// Model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    /// Predicted hours of sleep needed
    pub actual_sleep: f64,
}
