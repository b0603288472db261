//! Exogenous regressor matrix fed to group forecasters.

use crate::core::WideTable;
use crate::error::{ForecastError, Result};
use chrono::DateTime;
use chrono_tz::Tz;

/// Named regressors keyed by timestamp, one row per horizon step.
#[derive(Debug, Clone, PartialEq)]
pub struct ExogenousFeatureSet {
    table: WideTable,
}

impl ExogenousFeatureSet {
    /// A feature set with no regressors yet.
    pub fn new(index: Vec<DateTime<Tz>>) -> Result<Self> {
        Ok(Self {
            table: WideTable::empty(index, Vec::new())?,
        })
    }

    /// Add (or replace) a regressor column.
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        self.insert(name, values)?;
        Ok(self)
    }

    /// Add (or replace) a regressor column in place.
    pub fn insert(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        self.table.set_column(name, values)
    }

    pub fn index(&self) -> &[DateTime<Tz>] {
        self.table.index()
    }

    /// Regressor names in insertion order.
    pub fn names(&self) -> &[String] {
        self.table.columns()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.table.column(name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.table.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Values of every regressor at a row, in name order.
    pub fn row(&self, position: usize) -> Vec<f64> {
        self.table.row(position)
    }

    /// Fail if any regressor has a missing value.
    pub fn ensure_complete(&self) -> Result<()> {
        for (position, name) in self.table.columns().iter().enumerate() {
            if self.table.column_at(position)?.iter().any(|v| !v.is_finite()) {
                return Err(ForecastError::MissingValues(name.clone()));
            }
        }
        Ok(())
    }

}
