//! Exogenous regressors for the group forecasters.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone};
//! use chrono_tz::Tz;
//! use loadcast::features::{calendar, hourly_exog};
//! use loadcast::core::TimeSeries;
//!
//! let start = Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let history: Vec<_> = (0..28 * 24).map(|h| start + Duration::hours(h)).collect();
//! let prices = TimeSeries::new(history.clone(), vec![42.0; history.len()]).unwrap();
//!
//! let train_end = *history.last().unwrap();
//! let horizon: Vec<_> = (1..=48).map(|h| train_end + Duration::hours(h)).collect();
//!
//! let exog = hourly_exog(&horizon, &prices, train_end, Default::default()).unwrap();
//! assert_eq!(exog.len(), 48);
//! assert_eq!(exog.column(calendar::HOUR).unwrap()[0], 0.0);
//! assert_eq!(exog.column("price").unwrap()[47], 42.0);
//! ```

pub mod calendar;
pub mod exog;
pub mod price;

pub use calendar::{hourly_features, monthly_features};
pub use exog::ExogenousFeatureSet;
pub use price::{training_price, HourlyProfile, PriceProjector, PRICE};

use crate::core::TimeSeries;
use crate::error::Result;
use chrono::DateTime;
use chrono_tz::Tz;

/// Hourly calendar regressors plus the projected price for a horizon.
pub fn hourly_exog(
    horizon: &[DateTime<Tz>],
    prices: &TimeSeries,
    train_end: DateTime<Tz>,
    projector: PriceProjector,
) -> Result<ExogenousFeatureSet> {
    let price = projector.future_price(horizon, prices, train_end)?;
    let mut exog = hourly_features(horizon)?;
    exog.insert(PRICE, price.values().to_vec())?;
    exog.ensure_complete()?;
    Ok(exog)
}

/// Monthly calendar regressors for a horizon.
pub fn monthly_exog(horizon: &[DateTime<Tz>]) -> Result<ExogenousFeatureSet> {
    let exog = monthly_features(horizon)?;
    exog.ensure_complete()?;
    Ok(exog)
}
