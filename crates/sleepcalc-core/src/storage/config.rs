//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default form values (wake time, sleep amount, coffee intake)
//! - Location of the sleep model artifact
//! - Clock style used to display the bedtime
//!
//! Configuration is stored at `~/.config/sleepcalc/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calculation::CalculationRequest;
use crate::error::ConfigError;
use crate::input::{CoffeeIntake, SleepAmount, WakeTime};
use crate::predictor::ClockFormat;

const MODEL_FILE_NAME: &str = "model.toml";

/// Values the form starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub wake_time: WakeTime,
    #[serde(default)]
    pub sleep_amount: SleepAmount,
    #[serde(default)]
    pub coffee_intake: CoffeeIntake,
}

/// Model artifact configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Artifact path. Falls back to `<data_dir>/model.toml`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub clock: ClockFormat,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/sleepcalc/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                // Empty clears optional values; required fields reject null below
                let new_value = match existing {
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ if value.is_empty() => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    ///
    /// Any other read failure (permissions, non-UTF-8 content) is an error
    /// and the file is left untouched.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| load_failed(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is rejected by
    /// the field's validation (e.g. a sleep amount outside 4..=12).
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails; the error is logged.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Resolved model artifact path.
    pub fn model_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.model.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(data_dir()?.join(MODEL_FILE_NAME)),
        }
    }

    /// Request pre-filled with the configured defaults.
    pub fn default_request(&self) -> CalculationRequest {
        CalculationRequest {
            wake_time: self.defaults.wake_time,
            sleep_amount: self.defaults.sleep_amount,
            coffee_intake: self.defaults.coffee_intake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.defaults.wake_time.to_string(), "07:00");
        assert_eq!(parsed.defaults.sleep_amount.hours(), 8.0);
        assert_eq!(parsed.defaults.coffee_intake.cups(), 1);
        assert_eq!(parsed.display.clock, ClockFormat::TwelveHour);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[display]\nclock = \"24h\"\n").unwrap();
        assert_eq!(parsed.display.clock, ClockFormat::TwentyFourHour);
        assert_eq!(parsed.defaults, DefaultsConfig::default());
        assert!(parsed.model.path.is_none());
    }

    #[test]
    fn out_of_range_file_value_rejected() {
        let result = toml::from_str::<Config>("[defaults]\nsleep_amount = 13.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn get_by_dot_path() {
        let cfg = Config::default();
        assert_eq!(cfg.get("defaults.wake_time").as_deref(), Some("07:00"));
        assert_eq!(cfg.get("defaults.coffee_intake").as_deref(), Some("1"));
        assert_eq!(cfg.get("display.clock").as_deref(), Some("12h"));
        assert!(cfg.get("nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_validates_values() {
        let mut cfg = Config::default();
        cfg.apply("defaults.sleep_amount", "7.5").unwrap();
        cfg.apply("defaults.coffee_intake", "3").unwrap();
        cfg.apply("defaults.wake_time", "06:15").unwrap();
        cfg.apply("display.clock", "24h").unwrap();
        cfg.apply("model.path", "/tmp/model.toml").unwrap();

        assert_eq!(cfg.defaults.sleep_amount.hours(), 7.5);
        assert_eq!(cfg.defaults.coffee_intake.cups(), 3);
        assert_eq!(cfg.defaults.wake_time, WakeTime::new(6, 15).unwrap());
        assert_eq!(cfg.display.clock, ClockFormat::TwentyFourHour);
        assert_eq!(cfg.model_path().unwrap(), PathBuf::from("/tmp/model.toml"));

        assert!(matches!(
            cfg.apply("defaults.sleep_amount", "12.5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("defaults.coffee_intake", "21").is_err());
        assert!(cfg.apply("defaults.wake_time", "25:00").is_err());
        assert!(cfg.apply("display.clock", "36h").is_err());
        assert!(matches!(
            cfg.apply("defaults.bogus", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("defaults", "1"), Err(ConfigError::UnknownKey(_))));

        // Rejected writes leave the previous values intact
        assert_eq!(cfg.defaults.sleep_amount.hours(), 7.5);
    }

    #[test]
    fn unset_model_path_reads_empty_and_can_be_cleared() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("model.path").as_deref(), Some(""));

        cfg.apply("model.path", "/tmp/model.toml").unwrap();
        assert_eq!(cfg.get("model.path").as_deref(), Some("/tmp/model.toml"));

        cfg.apply("model.path", "").unwrap();
        assert!(cfg.model.path.is_none());
        assert_eq!(cfg.get("model.path").as_deref(), Some(""));
    }

    #[test]
    fn empty_value_rejected_for_required_field() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("defaults.wake_time", ""),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("defaults.sleep_amount", "").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn non_utf8_file_is_rejected_and_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut bytes = b"[defaults]\nwake_time = \"05:30\"\n# caf".to_vec();
        bytes.push(0xe9);
        bytes.push(b'\n');
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn load_from_missing_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("defaults.wake_time", "05:45").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, cfg);
    }

    #[test]
    fn corrupt_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "defaults = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn default_request_uses_defaults() {
        let mut cfg = Config::default();
        cfg.apply("defaults.coffee_intake", "4").unwrap();
        let request = cfg.default_request();
        assert_eq!(request.coffee_intake.cups(), 4);
        assert_eq!(request.wake_time, WakeTime::default());
    }
}
