//! Submission CSV rendering.
//!
//! The dialect is `;`-delimited with a decimal comma, a leading
//! `measured_at` column in UTC and one column per group.

use crate::core::WideTable;
use crate::error::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Name of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "measured_at";

/// Field delimiter of the submission dialect.
pub const DELIMITER: u8 = b';';

/// `YYYY-MM-DDTHH:MM:SS.000Z` in UTC.
pub fn format_timestamp(t: &DateTime<Tz>) -> String {
    t.with_timezone(&Tz::UTC)
        .format("%Y-%m-%dT%H:%M:%S.000Z")
        .to_string()
}

/// Decimal-comma rendering; NaN becomes an empty field, infinities are
/// written as `inf` and `-inf`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        v.to_string().replace('.', ",")
    }
}

/// Header row: `measured_at` followed by the group columns in table order.
pub fn header(table: &WideTable) -> Vec<String> {
    std::iter::once(TIMESTAMP_COLUMN.to_string())
        .chain(table.columns().iter().cloned())
        .collect()
}

/// Data rows in index order.
pub fn rows(table: &WideTable) -> Vec<Vec<String>> {
    table
        .index()
        .iter()
        .enumerate()
        .map(|(pos, t)| {
            std::iter::once(format_timestamp(t))
                .chain(table.row(pos).into_iter().map(format_value))
                .collect()
        })
        .collect()
}

/// Write `table` as a submission to any writer.
pub fn write_submission<W: io::Write>(table: &WideTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);

    wtr.write_record(header(table))?;
    for row in rows(table) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` to `path`, creating the parent directory when needed.
pub fn write_submission_file(table: &WideTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_submission(table, io::BufWriter::new(file))?;
    info!(
        path = %path.display(),
        rows = table.n_rows(),
        groups = table.n_cols(),
        "submission written"
    );
    Ok(())
}
