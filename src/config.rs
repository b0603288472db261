//! Pipeline configuration.
//!
//! Every path and tunable the pipeline needs travels in a [`PipelineConfig`]
//! value; nothing is read from process-wide state.
//!
//! # Example
//!
//! ```
//! use loadcast::config::PipelineConfig;
//! use loadcast::models::HourlyComposition;
//!
//! let config = PipelineConfig::from_toml_str(
//!     r#"
//!     output_dir = "out"
//!     max_groups = 10
//!     hourly_composition = "baseline_plus_residual"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.horizon_hours, 48);
//! assert_eq!(config.max_groups, Some(10));
//! assert_eq!(config.hourly_composition, HourlyComposition::BaselinePlusResidual);
//! ```

use crate::error::{ForecastError, Result};
use crate::features::price::DEFAULT_WINDOW_DAYS;
use crate::horizon::HOURLY_STEPS;
use crate::models::HourlyComposition;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Longest price window or baseline lag accepted, in days.
pub const MAX_DAYS: i64 = 366;

/// Longest hourly horizon accepted.
pub const MAX_HORIZON_HOURS: usize = 24 * 366;

/// Paths and tunables for one forecasting run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding hourly `group_<id>.<ext>` artifacts.
    pub hourly_model_dir: PathBuf,
    /// Directory holding monthly artifacts.
    pub monthly_model_dir: PathBuf,
    /// Where submissions are written.
    pub output_dir: PathBuf,
    pub hourly_output_name: String,
    pub monthly_output_name: String,
    pub horizon_hours: usize,
    /// Lookback of the hour-of-day price profile, in days before training end.
    pub price_window_days: i64,
    pub baseline_lag_days: i64,
    /// Forecast only the first N groups of the history.
    pub max_groups: Option<usize>,
    pub hourly_composition: HourlyComposition,
    pub artifact_extension: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hourly_model_dir: PathBuf::from("models/hourly"),
            monthly_model_dir: PathBuf::from("models/monthly"),
            output_dir: PathBuf::from("output"),
            hourly_output_name: "forecast_48h_submission.csv".to_string(),
            monthly_output_name: "forecast_12m_submission.csv".to_string(),
            horizon_hours: HOURLY_STEPS,
            price_window_days: DEFAULT_WINDOW_DAYS,
            baseline_lag_days: 7,
            max_groups: None,
            hourly_composition: HourlyComposition::default(),
            artifact_extension: "pkl".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_model_dirs(
        mut self,
        hourly: impl Into<PathBuf>,
        monthly: impl Into<PathBuf>,
    ) -> Self {
        self.hourly_model_dir = hourly.into();
        self.monthly_model_dir = monthly.into();
        self
    }

    pub fn with_horizon_hours(mut self, hours: usize) -> Self {
        self.horizon_hours = hours;
        self
    }

    pub fn with_price_window_days(mut self, days: i64) -> Self {
        self.price_window_days = days;
        self
    }

    pub fn with_max_groups(mut self, n: usize) -> Self {
        self.max_groups = Some(n);
        self
    }

    pub fn with_composition(mut self, composition: HourlyComposition) -> Self {
        self.hourly_composition = composition;
        self
    }

    pub fn hourly_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.hourly_output_name)
    }

    pub fn monthly_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.monthly_output_name)
    }

    /// Reject settings no run could use.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_HORIZON_HOURS).contains(&self.horizon_hours) {
            return Err(ForecastError::Config(format!(
                "horizon_hours must be between 1 and {MAX_HORIZON_HOURS}"
            )));
        }
        if !(1..=MAX_DAYS).contains(&self.price_window_days) {
            return Err(ForecastError::Config(format!(
                "price_window_days must be between 1 and {MAX_DAYS}"
            )));
        }
        if !(1..=MAX_DAYS).contains(&self.baseline_lag_days) {
            return Err(ForecastError::Config(format!(
                "baseline_lag_days must be between 1 and {MAX_DAYS}"
            )));
        }
        if self.max_groups == Some(0) {
            return Err(ForecastError::Config(
                "max_groups must be at least 1 when set".to_string(),
            ));
        }
        if self.hourly_output_name.is_empty() || self.monthly_output_name.is_empty() {
            return Err(ForecastError::Config(
                "output file names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
