//! Timestamp-indexed table with one column per group.

use crate::core::time_series::validate_index;
use crate::error::{ForecastError, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};

/// A wide table: rows are timestamps (ascending), columns are named groups.
///
/// Values are stored column-major; an empty cell is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    index: Vec<DateTime<Tz>>,
    columns: Vec<String>,
    /// values[column][row]
    values: Vec<Vec<f64>>,
    timezone: Tz,
}

impl WideTable {
    /// Create a table from column-major values.
    pub fn new(
        index: Vec<DateTime<Tz>>,
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let timezone = index.first().map(|t| t.timezone()).unwrap_or(Tz::UTC);
        validate_index(&index, timezone)?;

        if values.len() != columns.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: columns.len(),
                got: values.len(),
            });
        }
        for column in &values {
            if column.len() != index.len() {
                return Err(ForecastError::DimensionMismatch {
                    expected: index.len(),
                    got: column.len(),
                });
            }
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(ForecastError::InvalidParameter(format!(
                    "duplicate column '{name}'"
                )));
            }
        }

        Ok(Self {
            index,
            columns,
            values,
            timezone,
        })
    }

    /// Create a table with every cell empty.
    pub fn empty(index: Vec<DateTime<Tz>>, columns: Vec<String>) -> Result<Self> {
        let values = vec![vec![f64::NAN; index.len()]; columns.len()];
        Self::new(index, columns, values)
    }

    /// Build a table from row-major records.
    pub fn from_rows(
        index: Vec<DateTime<Tz>>,
        columns: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if rows.len() != index.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: index.len(),
                got: rows.len(),
            });
        }
        for row in &rows {
            if row.len() != columns.len() {
                return Err(ForecastError::DimensionMismatch {
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        let values = (0..columns.len())
            .map(|c| rows.iter().map(|row| row[c]).collect())
            .collect();
        Self::new(index, columns, values)
    }

    pub fn index(&self) -> &[DateTime<Tz>] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Last timestamp of the index.
    pub fn end(&self) -> Option<DateTime<Tz>> {
        self.index.last().copied()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.column_position(name).map(|i| self.values[i].as_slice())
    }

    /// Values of a column by position.
    pub fn column_at(&self, position: usize) -> Result<&[f64]> {
        self.values
            .get(position)
            .map(|v| v.as_slice())
            .ok_or(ForecastError::DimensionMismatch {
                expected: self.values.len(),
                got: position + 1,
            })
    }

    /// Row values at a position, in column order.
    pub fn row(&self, position: usize) -> Vec<f64> {
        self.values.iter().map(|col| col[position]).collect()
    }

    /// Assign a whole column, appending it when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.index.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.index.len(),
                got: values.len(),
            });
        }
        match self.column_position(name) {
            Some(i) => self.values[i] = values,
            None => {
                self.columns.push(name.to_string());
                self.values.push(values);
            }
        }
        Ok(())
    }

    /// Fill every empty (`NaN`) cell of a column.
    pub fn fill_column(&mut self, position: usize, value: f64) {
        if let Some(column) = self.values.get_mut(position) {
            for cell in column.iter_mut().filter(|v| v.is_nan()) {
                *cell = value;
            }
        }
    }

    /// Whether every cell of a column is `NaN`. Infinities count as values.
    pub fn is_column_empty(&self, position: usize) -> bool {
        self.values
            .get(position)
            .map(|col| col.iter().all(|v| v.is_nan()))
            .unwrap_or(true)
    }

    /// Left-join rows onto `index`; timestamps absent from this table become empty.
    pub fn reindex_rows(&self, index: &[DateTime<Tz>]) -> Result<WideTable> {
        let lookup: HashMap<&DateTime<Tz>, usize> =
            self.index.iter().enumerate().map(|(i, t)| (t, i)).collect();
        let positions: Vec<Option<usize>> = index.iter().map(|t| lookup.get(t).copied()).collect();

        let values = self
            .values
            .iter()
            .map(|col| {
                positions
                    .iter()
                    .map(|p| p.map(|i| col[i]).unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();

        WideTable::new(index.to_vec(), self.columns.clone(), values)
    }

    /// Reorder columns to exactly `columns`; unknown names become empty columns.
    pub fn reindex_columns(&self, columns: &[String]) -> Result<WideTable> {
        let values = columns
            .iter()
            .map(|name| match self.column(name) {
                Some(values) => values.to_vec(),
                None => vec![f64::NAN; self.index.len()],
            })
            .collect();

        WideTable::new(self.index.clone(), columns.to_vec(), values)
    }

    /// Replace the row labels, keeping values positionally.
    pub fn relabel(&self, index: Vec<DateTime<Tz>>) -> Result<WideTable> {
        if index.len() != self.index.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.index.len(),
                got: index.len(),
            });
        }
        WideTable::new(index, self.columns.clone(), self.values.clone())
    }

    /// Keep only the first `n` columns.
    pub fn take_columns(&self, n: usize) -> WideTable {
        let n = n.min(self.columns.len());
        WideTable {
            index: self.index.clone(),
            columns: self.columns[..n].to_vec(),
            values: self.values[..n].to_vec(),
            timezone: self.timezone,
        }
    }
}
