//! Baseline forecasts.
//!
//! Naive lag methods that serve as a reference signal for the hourly horizon.

mod weekly;

pub use weekly::{weekly_baseline, LagBaseline};
