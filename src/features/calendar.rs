//! Deterministic calendar regressors.

use crate::error::Result;
use crate::features::exog::ExogenousFeatureSet;
use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;

pub const HOUR: &str = "hour";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const MONTH: &str = "month";
pub const IS_WEEKEND: &str = "is_weekend";
pub const YEAR: &str = "year";
pub const TREND: &str = "t";

/// Hourly regressors: `hour`, `day_of_week` (0 = Monday), `month`, `is_weekend`.
///
/// Calendar fields are read in each timestamp's own timezone.
pub fn hourly_features(index: &[DateTime<Tz>]) -> Result<ExogenousFeatureSet> {
    let hour = index.iter().map(|t| t.hour() as f64).collect();
    let day_of_week: Vec<f64> = index
        .iter()
        .map(|t| t.weekday().num_days_from_monday() as f64)
        .collect();
    let month = index.iter().map(|t| t.month() as f64).collect();
    let is_weekend = day_of_week
        .iter()
        .map(|&d| if d >= 5.0 { 1.0 } else { 0.0 })
        .collect();

    ExogenousFeatureSet::new(index.to_vec())?
        .with_column(HOUR, hour)?
        .with_column(DAY_OF_WEEK, day_of_week)?
        .with_column(MONTH, month)?
        .with_column(IS_WEEKEND, is_weekend)
}

/// Monthly regressors: `month`, `year` and `t`, a 1-based trend counter over
/// the given index.
pub fn monthly_features(index: &[DateTime<Tz>]) -> Result<ExogenousFeatureSet> {
    let month = index.iter().map(|t| t.month() as f64).collect();
    let year = index.iter().map(|t| t.year() as f64).collect();
    let trend = (1..=index.len()).map(|i| i as f64).collect();

    ExogenousFeatureSet::new(index.to_vec())?
        .with_column(MONTH, month)?
        .with_column(YEAR, year)?
        .with_column(TREND, trend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn hourly_features_decode_calendar() {
        // 2024-01-12 is a Friday.
        let base = Tz::UTC.with_ymd_and_hms(2024, 1, 12, 22, 0, 0).unwrap();
        let index: Vec<_> = (0..4).map(|i| base + Duration::hours(i)).collect();
        let features = hourly_features(&index).unwrap();

        assert_eq!(features.column(HOUR).unwrap(), &[22.0, 23.0, 0.0, 1.0]);
        assert_eq!(features.column(DAY_OF_WEEK).unwrap(), &[4.0, 4.0, 5.0, 5.0]);
        assert_eq!(features.column(MONTH).unwrap(), &[1.0; 4]);
        assert_eq!(features.column(IS_WEEKEND).unwrap(), &[0.0, 0.0, 1.0, 1.0]);
        assert!(features.ensure_complete().is_ok());
    }

    #[test]
    fn hourly_features_use_local_time() {
        let utc = Tz::UTC.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap();
        let local = utc.with_timezone(&chrono_tz::Europe::Helsinki);
        let features = hourly_features(&[local]).unwrap();

        // 22:00 UTC is 01:00 on Sunday in Helsinki (UTC+3 in summer).
        assert_eq!(features.column(HOUR).unwrap(), &[1.0]);
        assert_eq!(features.column(DAY_OF_WEEK).unwrap(), &[6.0]);
    }

    #[test]
    fn monthly_trend_counter_is_positional() {
        let index: Vec<_> = [(2024, 11), (2024, 12), (2025, 1)]
            .iter()
            .map(|&(y, m)| Tz::UTC.with_ymd_and_hms(y, m, 1, 0, 0, 0).unwrap())
            .collect();
        let features = monthly_features(&index).unwrap();

        assert_eq!(features.column(MONTH).unwrap(), &[11.0, 12.0, 1.0]);
        assert_eq!(features.column(YEAR).unwrap(), &[2024.0, 2024.0, 2025.0]);
        assert_eq!(features.column(TREND).unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_index_gives_empty_features() {
        let features = hourly_features(&[]).unwrap();
        assert!(features.is_empty());
        assert_eq!(features.names().len(), 4);
    }
}
