//! Group forecasters, baselines and forecast assembly.

pub mod assembler;
pub mod baseline;
mod traits;

pub use assembler::{Assembly, AssemblyReport, ForecastAssembler, GroupOutcome, HourlyComposition};
pub use traits::{ArtifactDirectory, BoxedForecaster, Forecaster, ModelRegistry, ModelSource, ModelSpec};
