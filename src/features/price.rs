//! Price regressor for the training window and the forecast horizon.
//!
//! Historical prices are aligned to the consumption index and gap-filled.
//! Future prices come from the observed series where it already reaches the
//! horizon, and otherwise from the mean price per hour-of-day over a trailing
//! window that ends at the last training timestamp.

use crate::core::{checked_days, checked_sub, TimeSeries};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use tracing::debug;

pub const PRICE: &str = "price";

/// Default look-back of the seasonal-hour window, in days before `train_end`.
pub const DEFAULT_WINDOW_DAYS: i64 = 27;

/// Align prices to the consumption index and fill every gap.
///
/// Keeps only timestamps present in both series, interpolates inner gaps by
/// elapsed time, then forward- and backward-fills the edges.
pub fn training_price(
    consumption_index: &[DateTime<Tz>],
    prices: &TimeSeries,
) -> Result<TimeSeries> {
    let aligned = prices.restrict_to(consumption_index).filled();
    if aligned.has_missing_values() {
        return Err(ForecastError::MissingValues(PRICE.to_string()));
    }
    Ok(aligned)
}

/// Mean price per hour-of-day; `None` for hours without an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfile {
    means: [Option<f64>; 24],
}

impl HourlyProfile {
    /// Average every finite observation by its local hour-of-day.
    pub fn from_series(series: &TimeSeries) -> Self {
        let mut sums = [0.0; 24];
        let mut counts = [0usize; 24];
        for (t, v) in series.iter().filter(|(_, v)| v.is_finite()) {
            let h = t.hour() as usize;
            sums[h] += v;
            counts[h] += 1;
        }

        let mut means = [None; 24];
        for h in 0..24 {
            if counts[h] > 0 {
                means[h] = Some(sums[h] / counts[h] as f64);
            }
        }
        Self { means }
    }

    pub fn get(&self, hour: u32) -> Option<f64> {
        self.means.get(hour as usize).copied().flatten()
    }

    /// Mean for an hour, failing when the window never saw it.
    pub fn require(&self, hour: u32) -> Result<f64> {
        self.get(hour)
            .ok_or(ForecastError::IncompletePriceWindow { hour })
    }

}

/// Projects the price regressor onto a forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceProjector {
    window_days: i64,
}

impl Default for PriceProjector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl PriceProjector {
    /// `window_days` is the look-back before `train_end`; both ends are included.
    pub fn new(window_days: i64) -> Self {
        Self { window_days }
    }

    /// Seasonal-hour profile over `[train_end - window_days, train_end]`.
    pub fn profile(&self, filled: &TimeSeries, train_end: DateTime<Tz>) -> Result<HourlyProfile> {
        let start = checked_sub(train_end, checked_days(self.window_days)?)?;
        Ok(HourlyProfile::from_series(&filled.between(start, train_end)))
    }

    /// Price for every horizon timestamp.
    ///
    /// A timestamp that is a known observation (not after the last price)
    /// takes the observed, gap-filled value. Anything else takes the window's
    /// mean for its hour-of-day, read in the price series' timezone.
    pub fn future_price(
        &self,
        horizon: &[DateTime<Tz>],
        prices: &TimeSeries,
        train_end: DateTime<Tz>,
    ) -> Result<TimeSeries> {
        let filled = prices.filled();
        let last_price_time = filled.end();
        let profile = self.profile(&filled, train_end)?;

        let mut known = 0usize;
        let mut values = Vec::with_capacity(horizon.len());
        for t in horizon {
            let observed = match last_price_time {
                Some(last) if *t <= last => filled.value_at(t).filter(|v| v.is_finite()),
                _ => None,
            };
            let value = match observed {
                Some(v) => {
                    known += 1;
                    v
                }
                None => {
                    let hour = t.with_timezone(&filled.timezone()).hour();
                    profile.require(hour)?
                }
            };
            values.push(value);
        }

        debug!(
            steps = horizon.len(),
            known,
            estimated = horizon.len() - known,
            window_days = self.window_days,
            "projected future price"
        );

        TimeSeries::new(horizon.to_vec(), values)
    }
}
