//! Training-set preparation: hourly alignment with prices and monthly totals.

use crate::core::{TimeSeries, WideTable};
use crate::error::{ForecastError, Result};
use crate::features::{hourly_features, monthly_features, training_price, ExogenousFeatureSet, PRICE};
use chrono::{DateTime, Datelike, TimeZone};
use chrono_tz::Tz;
use std::collections::HashSet;

/// Local midnight on the first day of the month containing `t`.
pub fn month_start(t: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let tz = t.timezone();
    tz.with_ymd_and_hms(t.year(), t.month(), 1, 0, 0, 0)
        .earliest()
        .ok_or_else(|| {
            ForecastError::TimestampError(format!(
                "no local midnight for {}-{:02}-01 in {}",
                t.year(),
                t.month(),
                tz
            ))
        })
}

fn next_month_start(t: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let (year, month) = if t.month() == 12 {
        (t.year() + 1, 1)
    } else {
        (t.year(), t.month() + 1)
    };
    let tz = t.timezone();
    tz.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .earliest()
        .ok_or_else(|| {
            ForecastError::TimestampError(format!(
                "no local midnight for {year}-{month:02}-01 in {tz}"
            ))
        })
}

/// Sum hourly consumption into calendar months.
///
/// Rows are month starts in the history's timezone, covering every month from
/// the first to the last observation. Empty cells count as zero, so a month
/// with no data sums to `0.0`.
pub fn monthly_totals(history: &WideTable) -> Result<WideTable> {
    let (first, last) = match (history.index().first(), history.end()) {
        (Some(first), Some(last)) => (*first, last),
        _ => return Err(ForecastError::EmptyHistory),
    };

    let mut months = vec![month_start(&first)?];
    let last_month = month_start(&last)?;
    while let Some(current) = months.last().copied() {
        if current >= last_month {
            break;
        }
        months.push(next_month_start(&current)?);
    }

    let mut values = vec![vec![0.0; months.len()]; history.n_cols()];
    let mut bucket = 0;
    for (row, t) in history.index().iter().enumerate() {
        while bucket + 1 < months.len() && *t >= months[bucket + 1] {
            bucket += 1;
        }
        for (col, column) in values.iter_mut().enumerate() {
            let v = history.column_at(col)?[row];
            if !v.is_nan() {
                column[bucket] += v;
            }
        }
    }

    WideTable::new(months, history.columns().to_vec(), values)
}

/// Hourly training set: consumption and regressors on the timestamps shared
/// by consumption and prices, with a gap-filled `price` column.
pub fn hourly_training(
    history: &WideTable,
    prices: &TimeSeries,
) -> Result<(WideTable, ExogenousFeatureSet)> {
    let price_index: HashSet<&DateTime<Tz>> = prices.timestamps().iter().collect();
    let common: Vec<DateTime<Tz>> = history
        .index()
        .iter()
        .filter(|t| price_index.contains(t))
        .copied()
        .collect();

    let consumption = history.reindex_rows(&common)?;
    let price = training_price(&common, prices)?;
    let mut exog = hourly_features(&common)?;
    exog.insert(PRICE, price.values().to_vec())?;
    exog.ensure_complete()?;
    Ok((consumption, exog))
}

/// Monthly training set: monthly totals plus `month`, `year`, `t` regressors.
pub fn monthly_training(history: &WideTable) -> Result<(WideTable, ExogenousFeatureSet)> {
    let totals = monthly_totals(history)?;
    let exog = monthly_features(totals.index())?;
    Ok((totals, exog))
}
