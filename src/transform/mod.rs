//! Training-data transformations.

pub mod resample;

pub use resample::{hourly_training, month_start, monthly_totals, monthly_training};
