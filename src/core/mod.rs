//! Core data structures for timestamp-indexed consumption data.

mod forecast;
mod time_series;
mod wide_table;

pub use forecast::Forecast;
pub use time_series::TimeSeries;
pub(crate) use time_series::{checked_add, checked_days, checked_sub};
pub use wide_table::WideTable;
