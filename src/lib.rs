//! # loadcast
//!
//! Grouped electricity-consumption forecasting pipeline.
//!
//! Builds a 48-hour and a 12-month forecast for every customer group from
//! pre-trained per-group models: derives the horizon, computes calendar and
//! price regressors, runs each group's model, aligns the result to a
//! submission template and writes it in the `;`/decimal-comma CSV dialect.

#![allow(clippy::type_complexity)]

pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod horizon;
pub mod models;
pub mod pipeline;
pub mod submission;
pub mod transform;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::PipelineConfig;
    pub use crate::core::{Forecast, TimeSeries, WideTable};
    pub use crate::error::{ForecastError, Result};
    pub use crate::features::ExogenousFeatureSet;
    pub use crate::models::{
        ArtifactDirectory, BoxedForecaster, Forecaster, HourlyComposition, ModelRegistry,
        ModelSource, ModelSpec,
    };
    pub use crate::pipeline::{Pipeline, Submission};
}
