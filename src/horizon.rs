//! Forecast horizon indices.
//!
//! The hourly horizon is derived from the end of the training history; the
//! monthly horizon is whatever the submission template asks for.

use crate::core::{checked_add, WideTable};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration};
use chrono_tz::Tz;

/// Number of steps in the hourly horizon.
pub const HOURLY_STEPS: usize = 48;

/// The 48 hourly timestamps following the last training timestamp.
pub fn hourly_horizon(history: &WideTable) -> Result<Vec<DateTime<Tz>>> {
    hourly_horizon_with_steps(history, HOURLY_STEPS)
}

/// `steps` hourly timestamps starting one hour after the history ends.
///
/// The index carries the history's timezone.
pub fn hourly_horizon_with_steps(
    history: &WideTable,
    steps: usize,
) -> Result<Vec<DateTime<Tz>>> {
    let train_end = history.end().ok_or(ForecastError::EmptyHistory)?;
    if steps == 0 {
        return Err(ForecastError::InvalidParameter(
            "horizon must have at least one step".to_string(),
        ));
    }
    (1..=steps as i64)
        .map(|h| checked_add(train_end, Duration::hours(h)))
        .collect()
}

/// Template timestamps in ascending order.
pub fn monthly_horizon(template: &WideTable) -> Result<Vec<DateTime<Tz>>> {
    if template.is_empty() {
        return Err(ForecastError::MalformedTemplate(
            "template has no timestamps".to_string(),
        ));
    }
    let mut index = template.index().to_vec();
    index.sort();
    Ok(index)
}
