//! Property-based tests for horizon, calendar, price and alignment invariants.

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Tz;
use loadcast::core::{TimeSeries, WideTable};
use loadcast::features::calendar::{DAY_OF_WEEK, IS_WEEKEND};
use loadcast::features::{hourly_features, PriceProjector};
use loadcast::horizon::hourly_horizon;
use loadcast::submission::align;
use proptest::prelude::*;

fn timezone_strategy() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(chrono_tz::Europe::Helsinki),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Asia::Kolkata),
    ]
}

/// Hourly index of `len` steps starting `offset_hours` after 2023-01-01 UTC.
fn hourly_index(tz: Tz, offset_hours: i64, len: usize) -> Vec<DateTime<Tz>> {
    let base = Tz::UTC
        .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
        .unwrap()
        .with_timezone(&tz);
    (0..len as i64)
        .map(|h| base + Duration::hours(offset_hours + h))
        .collect()
}

proptest! {
    #[test]
    fn hourly_horizon_is_48_consecutive_hours(
        tz in timezone_strategy(),
        offset in 0i64..24 * 365,
        len in 1usize..100,
    ) {
        let index = hourly_index(tz, offset, len);
        let history = WideTable::new(index.clone(), vec!["1".to_string()], vec![vec![1.0; len]]).unwrap();
        let horizon = hourly_horizon(&history).unwrap();

        prop_assert_eq!(horizon.len(), 48);
        prop_assert_eq!(horizon[0], *index.last().unwrap() + Duration::hours(1));
        for pair in horizon.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::hours(1));
        }
        prop_assert!(horizon.iter().all(|t| t.timezone() == tz));
    }

    #[test]
    fn weekend_flag_matches_day_of_week(
        tz in timezone_strategy(),
        offset in 0i64..24 * 365,
    ) {
        let index = hourly_index(tz, offset, 24 * 8);
        let features = hourly_features(&index).unwrap();
        let dow = features.column(DAY_OF_WEEK).unwrap();
        let weekend = features.column(IS_WEEKEND).unwrap();

        for (d, w) in dow.iter().zip(weekend) {
            prop_assert!((0.0..=6.0).contains(d));
            prop_assert_eq!(*w == 1.0, *d >= 5.0);
        }
    }

    #[test]
    fn projected_price_is_never_missing(
        offset in 0i64..24 * 365,
        days in 2usize..40,
        gaps in prop::collection::vec(any::<bool>(), 24),
        steps in 1usize..72,
    ) {
        let index = hourly_index(Tz::UTC, offset, days * 24);
        // Punch gaps into the last day only; interpolation must close them.
        let n = index.len();
        let values: Vec<f64> = (0..n)
            .map(|i| {
                let in_last_day = i + 24 >= n && i + 1 < n;
                if in_last_day && gaps[i % 24] { f64::NAN } else { 10.0 + (i % 24) as f64 }
            })
            .collect();
        let prices = TimeSeries::new(index.clone(), values).unwrap();

        let train_end = *index.last().unwrap();
        let horizon: Vec<_> = (1..=steps as i64).map(|h| train_end + Duration::hours(h)).collect();
        let projected = PriceProjector::default()
            .future_price(&horizon, &prices, train_end)
            .unwrap();

        prop_assert_eq!(projected.len(), steps);
        prop_assert!(projected.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn alignment_keeps_template_shape(
        rows in 1usize..30,
        populated in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let index = hourly_index(Tz::UTC, 0, rows);
        let groups: Vec<String> = (0..populated.len()).map(|g| g.to_string()).collect();
        let values: Vec<Vec<f64>> = populated
            .iter()
            .map(|p| if *p { vec![2.5; rows] } else { vec![f64::NAN; rows] })
            .collect();
        let forecast = WideTable::new(index.clone(), groups.clone(), values).unwrap();
        let template = WideTable::empty(index, groups.clone()).unwrap();

        let aligned = align(&forecast, &template).unwrap();
        prop_assert_eq!(aligned.table.index(), template.index());
        prop_assert_eq!(aligned.table.columns(), template.columns());

        for (g, p) in populated.iter().enumerate() {
            let expected = if *p { 2.5 } else { 0.0 };
            prop_assert!(aligned.table.column_at(g).unwrap().iter().all(|v| *v == expected));
            prop_assert_eq!(aligned.empty_groups.contains(&groups[g]), !*p);
        }
    }
}
