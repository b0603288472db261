//! Reading tables in the submission dialect.
//!
//! Templates, history exports and written submissions share one layout: a
//! `measured_at` column of RFC 3339 timestamps followed by one `;`-separated
//! column per group, decimal comma, empty fields for missing cells.

use crate::core::WideTable;
use crate::error::{ForecastError, Result};
use crate::submission::format::{DELIMITER, TIMESTAMP_COLUMN};
use chrono::DateTime;
use chrono_tz::Tz;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;

/// RFC 3339 timestamp, normalized to UTC.
pub fn parse_timestamp(field: &str) -> Result<DateTime<Tz>> {
    let parsed = DateTime::parse_from_rfc3339(field.trim())?;
    Ok(parsed.with_timezone(&Tz::UTC))
}

/// Decimal-comma number; an empty field is an empty cell.
pub fn parse_value(field: &str) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| ForecastError::Parse(format!("'{field}': {e}")))
}

/// Read a table from any reader; rows come back sorted by timestamp.
pub fn read_table<R: io::Read>(reader: R) -> Result<WideTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let ts_pos = headers
        .iter()
        .position(|h| h == TIMESTAMP_COLUMN)
        .ok_or_else(|| {
            ForecastError::MalformedTemplate(format!("missing '{TIMESTAMP_COLUMN}' column"))
        })?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(pos, _)| *pos != ts_pos)
        .map(|(_, name)| name.to_string())
        .collect();

    let mut records: Vec<(DateTime<Tz>, Vec<f64>)> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut timestamp = None;
        let mut row = Vec::with_capacity(columns.len());
        for (pos, field) in record.iter().enumerate() {
            if pos == ts_pos {
                timestamp = Some(parse_timestamp(field)?);
            } else {
                row.push(parse_value(field)?);
            }
        }
        let timestamp = timestamp.ok_or_else(|| {
            ForecastError::MalformedTemplate("row without a timestamp".to_string())
        })?;
        records.push((timestamp, row));
    }
    records.sort_by(|a, b| a.0.cmp(&b.0));

    let (index, rows): (Vec<_>, Vec<_>) = records.into_iter().unzip();
    debug!(rows = index.len(), groups = columns.len(), "table read");
    WideTable::from_rows(index, columns, rows).map_err(|e| match e {
        ForecastError::TimestampError(reason) => ForecastError::MalformedTemplate(reason),
        other => other,
    })
}

/// Read a table from a file.
pub fn read_table_path(path: &Path) -> Result<WideTable> {
    let file = File::open(path)?;
    read_table(BufReader::new(file))
}
