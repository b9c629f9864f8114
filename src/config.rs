//! YAML configuration for the journey engine and its hosts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    band::PrimeBand,
    error::ConfigError,
    geometry::{Calibration, FRONT_TIRE_FRACTION, REAR_TIRE_FRACTION},
    journey::OverrideRange,
    labels::LabelRows,
};

fn default_name() -> String {
    "default".to_string()
}

fn default_override_min() -> i32 {
    10
}

fn default_override_max() -> i32 {
    120
}

fn default_rear_tire() -> f64 {
    REAR_TIRE_FRACTION
}

fn default_front_tire() -> f64 {
    FRONT_TIRE_FRACTION
}

fn default_top_row() -> f64 {
    6.0
}

fn default_second_row() -> f64 {
    30.0
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub override_range: OverrideRangeConfig,
    #[serde(default)]
    pub prime_band: PrimeBand,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub labels: LabelRowsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverrideRangeConfig {
    #[serde(default = "default_override_min")]
    pub min: i32,
    #[serde(default = "default_override_max")]
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "default_rear_tire")]
    pub rear_tire: f64,
    #[serde(default = "default_front_tire")]
    pub front_tire: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelRowsConfig {
    #[serde(default = "default_top_row")]
    pub top_row_px: f64,
    #[serde(default = "default_second_row")]
    pub second_row_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for OverrideRangeConfig {
    fn default() -> Self {
        Self {
            min: default_override_min(),
            max: default_override_max(),
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            rear_tire: default_rear_tire(),
            front_tire: default_front_tire(),
        }
    }
}

impl Default for LabelRowsConfig {
    fn default() -> Self {
        Self {
            top_row_px: default_top_row(),
            second_row_px: default_second_row(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            override_range: OverrideRangeConfig::default(),
            prime_band: PrimeBand::default(),
            calibration: CalibrationConfig::default(),
            labels: LabelRowsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Validated view of a [`JourneyConfig`], the form the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct JourneySettings {
    pub override_range: OverrideRange,
    pub prime_band: PrimeBand,
    pub calibration: Calibration,
    pub label_rows: LabelRows,
}

impl JourneyConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: JourneyConfig =
            serde_yaml::from_str(text).context("Failed to parse journey config")?;
        config.settings()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn settings(&self) -> Result<JourneySettings, ConfigError> {
        Ok(JourneySettings {
            override_range: OverrideRange::new(self.override_range.min, self.override_range.max)?,
            prime_band: self.prime_band,
            calibration: Calibration::new(
                self.calibration.rear_tire,
                self.calibration.front_tire,
            )?,
            label_rows: LabelRows::new(self.labels.top_row_px, self.labels.second_row_px)?,
        })
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<JourneyConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read journey config {}", path.display()))?;
        let config = JourneyConfig::from_yaml_str(&data)
            .with_context(|| format!("Invalid journey config {}", path.display()))?;
        debug!(path = %path.display(), name = %config.name, "loaded journey config");
        Ok(config)
    }
}
