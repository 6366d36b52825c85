//! Top-level scheduler configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{LoopConfig, QueueConfig, TriggerConfig, TriggerMode};
use crate::constants::ENV_PREFIX;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ORGANIC_*`)
/// 2. Config file (TOML)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchedulerConfig {
    pub trigger: TriggerConfig,
    pub queue: QueueConfig,
    pub runtime: LoopConfig,
}

impl SchedulerConfig {
    /// Config with the given trigger and default queue/runtime sections.
    pub fn with_trigger(trigger: TriggerConfig) -> Self {
        Self {
            trigger,
            ..Default::default()
        }
    }

    /// Load configuration with layered resolution.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `ORGANIC_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    /// Values that fail to parse are skipped with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        if let Some(mode) = parse_override::<TriggerMode>(&get, "TRIGGER_MODE") {
            self.trigger.mode = mode;
        }
        if let Some(frequency) = parse_override::<f64>(&get, "TRIGGER_FREQUENCY") {
            self.trigger.frequency = frequency;
        }
        if let Some(min) = parse_override::<f64>(&get, "TRIGGER_MIN_FREQUENCY") {
            self.trigger.min_frequency = min;
        }
        if let Some(factor) = parse_override::<f64>(&get, "TRIGGER_SCALING_FACTOR") {
            self.trigger.scaling_factor = factor;
        }
        if let Some(capacity) = parse_override::<usize>(&get, "QUEUE_CAPACITY") {
            self.queue.capacity = capacity;
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trigger.validate()?;
        self.queue.validate()?;
        self.runtime.validate()?;
        Ok(())
    }
}

fn parse_override<T: FromStr>(get: &dyn Fn(&str) -> Option<String>, suffix: &str) -> Option<T> {
    let raw = get(suffix)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = %format!("{ENV_PREFIX}{suffix}"), value = %raw, "ignoring unparseable override");
            None
        }
    }
}
