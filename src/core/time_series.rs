//! TimeSeries data structure for a single timezone-aware signal.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use std::collections::HashSet;

/// A univariate time series with timezone-aware timestamps.
///
/// Missing observations are stored as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Tz>>,
    values: Vec<f64>,
    timezone: Tz,
}

impl TimeSeries {
    /// Create a series, inferring the timezone from the first timestamp.
    pub fn new(timestamps: Vec<DateTime<Tz>>, values: Vec<f64>) -> Result<Self> {
        let timezone = timestamps.first().map(|t| t.timezone()).unwrap_or(Tz::UTC);
        Self::with_timezone(timestamps, values, timezone)
    }

    /// Create a series with an explicit timezone.
    pub fn with_timezone(
        timestamps: Vec<DateTime<Tz>>,
        values: Vec<f64>,
        timezone: Tz,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        validate_index(&timestamps, timezone)?;

        Ok(Self {
            timestamps,
            values,
            timezone,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Tz>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Last timestamp, if any.
    pub fn end(&self) -> Option<DateTime<Tz>> {
        self.timestamps.last().copied()
    }

    /// Position of an exact timestamp.
    pub fn position(&self, timestamp: &DateTime<Tz>) -> Option<usize> {
        self.timestamps.binary_search(timestamp).ok()
    }

    /// Value at an exact timestamp; `None` when the timestamp is not indexed.
    pub fn value_at(&self, timestamp: &DateTime<Tz>) -> Option<f64> {
        self.position(timestamp).map(|i| self.values[i])
    }

    /// Iterate over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&DateTime<Tz>, f64)> {
        self.timestamps.iter().zip(self.values.iter().copied())
    }

    /// Observations with `start <= t <= end`.
    pub fn between(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> TimeSeries {
        let lo = self.timestamps.partition_point(|t| *t < start);
        let hi = self.timestamps.partition_point(|t| *t <= end);
        let hi = hi.max(lo);
        TimeSeries {
            timestamps: self.timestamps[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
            timezone: self.timezone,
        }
    }

    /// Restrict to the timestamps also present in `index`.
    pub fn restrict_to(&self, index: &[DateTime<Tz>]) -> TimeSeries {
        let keep: HashSet<&DateTime<Tz>> = index.iter().collect();
        let (timestamps, values) = self
            .iter()
            .filter(|(t, _)| keep.contains(t))
            .map(|(t, v)| (*t, v))
            .unzip();
        TimeSeries {
            timestamps,
            values,
            timezone: self.timezone,
        }
    }

    /// Check if series has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Interpolate inner gaps, then forward-fill and backward-fill edges.
    ///
    /// Only an all-missing series keeps missing values.
    pub fn filled(&self) -> TimeSeries {
        self.map_values(|values| {
            let mut result = interpolate_by_time(&self.timestamps, values);
            forward_fill(&mut result);
            backward_fill(&mut result);
            result
        })
    }

    fn map_values(&self, f: impl FnOnce(&[f64]) -> Vec<f64>) -> TimeSeries {
        TimeSeries {
            timestamps: self.timestamps.clone(),
            values: f(&self.values),
            timezone: self.timezone,
        }
    }
}

/// Check an index is strictly increasing and in a single timezone.
pub(crate) fn validate_index(timestamps: &[DateTime<Tz>], timezone: Tz) -> Result<()> {
    for window in timestamps.windows(2) {
        if window[1] <= window[0] {
            return Err(ForecastError::TimestampError(format!(
                "timestamps must be strictly increasing ({} follows {})",
                window[1], window[0]
            )));
        }
    }
    if let Some(other) = timestamps.iter().find(|t| t.timezone() != timezone) {
        return Err(ForecastError::TimestampError(format!(
            "mixed timezones: expected {}, found {}",
            timezone,
            other.timezone()
        )));
    }
    Ok(())
}

/// A whole number of days as a duration.
pub(crate) fn checked_days(days: i64) -> Result<Duration> {
    Duration::try_days(days).ok_or_else(|| {
        ForecastError::TimestampError(format!("{days} days is out of range"))
    })
}

/// `t - offset`, failing outside the representable date range.
pub(crate) fn checked_sub(t: DateTime<Tz>, offset: Duration) -> Result<DateTime<Tz>> {
    t.checked_sub_signed(offset).ok_or_else(|| {
        ForecastError::TimestampError(format!("{t} minus {offset} is out of range"))
    })
}

/// `t + offset`, failing outside the representable date range.
pub(crate) fn checked_add(t: DateTime<Tz>, offset: Duration) -> Result<DateTime<Tz>> {
    t.checked_add_signed(offset).ok_or_else(|| {
        ForecastError::TimestampError(format!("{t} plus {offset} is out of range"))
    })
}

/// Interpolate NaN runs linearly in elapsed time between their neighbours.
fn interpolate_by_time(timestamps: &[DateTime<Tz>], values: &[f64]) -> Vec<f64> {
    let mut result = values.to_vec();
    let n = result.len();

    let mut i = 0;
    while i < n {
        if result[i].is_finite() {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && !result[i].is_finite() {
            i += 1;
        }
        let end = i;

        if start == 0 || end == n {
            continue;
        }
        let (t0, v0) = (timestamps[start - 1], result[start - 1]);
        let (t1, v1) = (timestamps[end], result[end]);
        let span = (t1 - t0).num_seconds() as f64;
        for idx in start..end {
            let w = (timestamps[idx] - t0).num_seconds() as f64 / span;
            result[idx] = v0 + w * (v1 - v0);
        }
    }

    result
}

fn forward_fill(values: &mut [f64]) {
    let mut last = None;
    for v in values.iter_mut() {
        if v.is_finite() {
            last = Some(*v);
        } else if let Some(l) = last {
            *v = l;
        }
    }
}

fn backward_fill(values: &mut [f64]) {
    let mut next = None;
    for v in values.iter_mut().rev() {
        if v.is_finite() {
            next = Some(*v);
        } else if let Some(n) = next {
            *v = n;
        }
    }
}
