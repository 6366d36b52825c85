use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// What drives the scoring loop: wall-clock seconds or externally counted steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    Seconds,
    Steps,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Steps => "steps",
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" => Ok(Self::Seconds),
            "steps" => Ok(Self::Steps),
            other => Err(ConfigError::invalid(
                "trigger.mode",
                format!("expected `seconds` or `steps`, got `{other}`"),
            )),
        }
    }
}

/// Trigger and annealing parameters.
///
/// `frequency` is the base pacing unit (seconds or steps). The annealed unit
/// shrinks by `backlog / scaling_factor` and never drops below
/// `min_frequency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub mode: TriggerMode,
    pub frequency: f64,
    pub min_frequency: f64,
    pub scaling_factor: f64,
}

impl TriggerConfig {
    /// Build and validate a trigger config.
    pub fn new(
        mode: TriggerMode,
        frequency: f64,
        min_frequency: f64,
        scaling_factor: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            mode,
            frequency,
            min_frequency,
            scaling_factor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Seconds trigger with default floor and scaling factor.
    pub fn seconds(frequency: f64) -> Result<Self, ConfigError> {
        Self::new(
            TriggerMode::Seconds,
            frequency,
            defaults::DEFAULT_TRIGGER_MIN_FREQUENCY.min(frequency),
            defaults::DEFAULT_TRIGGER_SCALING_FACTOR,
        )
    }

    /// Steps trigger with default floor and scaling factor.
    pub fn steps(frequency: u64) -> Result<Self, ConfigError> {
        let frequency = frequency as f64;
        Self::new(
            TriggerMode::Steps,
            frequency,
            defaults::DEFAULT_TRIGGER_MIN_FREQUENCY.min(frequency),
            defaults::DEFAULT_TRIGGER_SCALING_FACTOR,
        )
    }

    pub fn with_min_frequency(mut self, min_frequency: f64) -> Result<Self, ConfigError> {
        self.min_frequency = min_frequency;
        self.validate()?;
        Ok(self)
    }

    pub fn with_scaling_factor(mut self, scaling_factor: f64) -> Result<Self, ConfigError> {
        self.scaling_factor = scaling_factor;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(ConfigError::invalid(
                "trigger.scaling_factor",
                "the scaling factor must be higher than 0",
            ));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ConfigError::invalid(
                "trigger.frequency",
                "must be a finite number greater than 0",
            ));
        }
        if !self.min_frequency.is_finite() || self.min_frequency <= 0.0 {
            return Err(ConfigError::invalid(
                "trigger.min_frequency",
                "must be a finite number greater than 0",
            ));
        }
        if self.min_frequency > self.frequency {
            return Err(ConfigError::invalid(
                "trigger.min_frequency",
                format!(
                    "must not exceed trigger.frequency ({} > {})",
                    self.min_frequency, self.frequency
                ),
            ));
        }
        Ok(())
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mode: TriggerMode::Seconds,
            frequency: defaults::DEFAULT_TRIGGER_FREQUENCY,
            min_frequency: defaults::DEFAULT_TRIGGER_MIN_FREQUENCY,
            scaling_factor: defaults::DEFAULT_TRIGGER_SCALING_FACTOR,
        }
    }
}
