//! Weekly seasonal-naive baseline.
//!
//! Forecasts each horizon hour with the observation from the same hour one
//! week earlier.

use crate::core::{checked_sub, WideTable};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration};
use chrono_tz::Tz;

/// Lag-based baseline over a wide history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagBaseline {
    lag: Duration,
}

impl LagBaseline {
    /// Create a baseline with the given seasonal lag.
    pub fn new(lag: Duration) -> Result<Self> {
        if lag <= Duration::zero() {
            return Err(ForecastError::InvalidParameter(
                "baseline lag must be positive".to_string(),
            ));
        }
        Ok(Self { lag })
    }

    /// Same hour one week earlier.
    pub fn weekly() -> Self {
        Self {
            lag: Duration::days(7),
        }
    }

    /// For each horizon timestamp `t`, every group's value at `t - lag`.
    ///
    /// Cells whose lagged timestamp is not in the history stay empty. The
    /// result is indexed by the horizon.
    pub fn compose(&self, history: &WideTable, horizon: &[DateTime<Tz>]) -> Result<WideTable> {
        let lagged = horizon
            .iter()
            .map(|t| checked_sub(*t, self.lag))
            .collect::<Result<Vec<DateTime<Tz>>>>()?;
        history.reindex_rows(&lagged)?.relabel(horizon.to_vec())
    }
}

impl Default for LagBaseline {
    fn default() -> Self {
        Self::weekly()
    }
}

/// Same-hour-last-week baseline for every group.
pub fn weekly_baseline(history: &WideTable, horizon: &[DateTime<Tz>]) -> Result<WideTable> {
    LagBaseline::weekly().compose(history, horizon)
}
