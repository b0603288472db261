//! End-to-end hourly and monthly runs.
//!
//! A run takes in-memory history (plus prices for the hourly horizon), a
//! submission template and a [`ModelSource`], and produces a template-shaped
//! submission table. The `write_*` variants also persist it to the configured
//! output directory.

use crate::config::PipelineConfig;
use crate::core::{checked_days, TimeSeries, WideTable};
use crate::error::{ForecastError, Result};
use crate::features::{hourly_exog, monthly_exog, PriceProjector};
use crate::horizon::{hourly_horizon_with_steps, monthly_horizon};
use crate::models::baseline::LagBaseline;
use crate::models::{ArtifactDirectory, AssemblyReport, BoxedForecaster, ForecastAssembler, ModelSource};
use crate::submission::{align, write_submission_file};
use chrono::DateTime;
use chrono_tz::Tz;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Template-shaped forecast plus what happened while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Timestamps the models were asked to forecast.
    pub horizon: Vec<DateTime<Tz>>,
    /// Aligned table, ready for formatting.
    pub table: WideTable,
    pub report: AssemblyReport,
    /// Template groups that were zero-filled.
    pub empty_groups: Vec<String>,
}

/// Runs the forecasting flows with an explicit configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Hourly model artifacts under the configured directory.
    pub fn hourly_artifacts<L>(&self, loader: L) -> ArtifactDirectory<L>
    where
        L: Fn(&Path) -> Result<BoxedForecaster>,
    {
        ArtifactDirectory::new(
            &self.config.hourly_model_dir,
            &self.config.artifact_extension,
            loader,
        )
    }

    /// Monthly model artifacts under the configured directory.
    pub fn monthly_artifacts<L>(&self, loader: L) -> ArtifactDirectory<L>
    where
        L: Fn(&Path) -> Result<BoxedForecaster>,
    {
        ArtifactDirectory::new(
            &self.config.monthly_model_dir,
            &self.config.artifact_extension,
            loader,
        )
    }

    /// History limited to the leading `max_groups` columns.
    pub fn restrict<'a>(&self, history: &'a WideTable) -> Cow<'a, WideTable> {
        match self.config.max_groups {
            Some(n) if n < history.n_cols() => {
                info!(kept = n, total = history.n_cols(), "restricting forecast to leading groups");
                Cow::Owned(history.take_columns(n))
            }
            _ => Cow::Borrowed(history),
        }
    }

    /// Hourly submission following the end of `history`.
    pub fn run_hourly<S>(
        &self,
        history: &WideTable,
        prices: &TimeSeries,
        template: &WideTable,
        source: &S,
    ) -> Result<Submission>
    where
        S: ModelSource + ?Sized,
    {
        let train_end = history.end().ok_or(ForecastError::EmptyHistory)?;
        let horizon = hourly_horizon_with_steps(history, self.config.horizon_hours)?;
        let history = self.restrict(history);
        log_horizon("hourly", &horizon, history.n_cols());

        let projector = PriceProjector::new(self.config.price_window_days);
        let exog = hourly_exog(&horizon, prices, train_end, projector)?;
        let baseline = LagBaseline::new(checked_days(self.config.baseline_lag_days)?)?;

        let assembly = ForecastAssembler::new(source)
            .with_composition(self.config.hourly_composition)
            .with_baseline(baseline)
            .assemble_hourly(history.columns(), &horizon, &exog, &history)?;

        finish(horizon, assembly.forecast, assembly.report, template)
    }

    /// Monthly submission over the template's timestamps.
    pub fn run_monthly<S>(
        &self,
        history: &WideTable,
        template: &WideTable,
        source: &S,
    ) -> Result<Submission>
    where
        S: ModelSource + ?Sized,
    {
        let horizon = monthly_horizon(template)?;
        let history = self.restrict(history);
        log_horizon("monthly", &horizon, history.n_cols());

        let exog = monthly_exog(&horizon)?;
        let assembly =
            ForecastAssembler::new(source).assemble_monthly(history.columns(), &horizon, &exog)?;

        finish(horizon, assembly.forecast, assembly.report, template)
    }

    /// Run the hourly flow and write the submission; returns it with its path.
    pub fn write_hourly<S>(
        &self,
        history: &WideTable,
        prices: &TimeSeries,
        template: &WideTable,
        source: &S,
    ) -> Result<(Submission, PathBuf)>
    where
        S: ModelSource + ?Sized,
    {
        let submission = self.run_hourly(history, prices, template, source)?;
        let path = self.config.hourly_output_path();
        write_submission_file(&submission.table, &path)?;
        Ok((submission, path))
    }

    /// Run the monthly flow and write the submission; returns it with its path.
    pub fn write_monthly<S>(
        &self,
        history: &WideTable,
        template: &WideTable,
        source: &S,
    ) -> Result<(Submission, PathBuf)>
    where
        S: ModelSource + ?Sized,
    {
        let submission = self.run_monthly(history, template, source)?;
        let path = self.config.monthly_output_path();
        write_submission_file(&submission.table, &path)?;
        Ok((submission, path))
    }
}

fn log_horizon(kind: &str, horizon: &[DateTime<Tz>], groups: usize) {
    if let (Some(first), Some(last)) = (horizon.first(), horizon.last()) {
        info!(
            kind,
            steps = horizon.len(),
            start = %first,
            end = %last,
            groups,
            "forecast horizon"
        );
    }
}

fn finish(
    horizon: Vec<DateTime<Tz>>,
    forecast: WideTable,
    report: AssemblyReport,
    template: &WideTable,
) -> Result<Submission> {
    let alignment = align(&forecast, template)?;
    info!(
        forecasted = report.forecasted().len(),
        missing_models = report.missing_models().len(),
        failed = report.failures().len(),
        "forecast assembled"
    );
    Ok(Submission {
        horizon,
        table: alignment.table,
        report,
        empty_groups: alignment.empty_groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Forecast;
    use crate::features::ExogenousFeatureSet;
    use crate::models::{Forecaster, ModelRegistry, ModelSpec};
    use chrono::{Duration, TimeZone};

    struct Constant(f64);

    impl Forecaster for Constant {
        fn predict(&self, steps: usize, _exog: &ExogenousFeatureSet) -> Result<Forecast> {
            Ok(Forecast::from_values(vec![self.0; steps]))
        }

        fn name(&self) -> &str {
            "Constant"
        }
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn history(groups: &[&str]) -> (WideTable, TimeSeries) {
        let start = Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let index: Vec<_> = (0..10 * 24).map(|h| start + Duration::hours(h)).collect();
        let n = index.len();
        let table = WideTable::new(
            index.clone(),
            names(groups),
            groups.iter().map(|_| vec![1.0; n]).collect(),
        )
        .unwrap();
        let prices = TimeSeries::new(index, vec![50.0; n]).unwrap();
        (table, prices)
    }

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(ModelSpec::new("a", || Ok(Box::new(Constant(2.0)) as BoxedForecaster)));
        registry.register(ModelSpec::new("b", || Ok(Box::new(Constant(3.0)) as BoxedForecaster)));
        registry
    }

    #[test]
    fn max_groups_limits_forecast() {
        let (history, prices) = history(&["a", "b"]);
        let horizon = hourly_horizon_with_steps(&history, 48).unwrap();
        let template = WideTable::empty(horizon, names(&["a", "b"])).unwrap();

        let pipeline = Pipeline::new(PipelineConfig::new().with_max_groups(1)).unwrap();
        let submission = pipeline
            .run_hourly(&history, &prices, &template, &registry())
            .unwrap();

        assert_eq!(submission.report.forecasted(), vec!["a"]);
        assert_eq!(submission.table.column("a").unwrap()[0], 2.0);
        assert_eq!(submission.table.column("b").unwrap()[0], 0.0);
        assert_eq!(submission.empty_groups, names(&["b"]));
        assert_eq!(pipeline.restrict(&history).columns(), &names(&["a"])[..]);
    }

    #[test]
    fn configured_horizon_length_is_used() {
        let (history, prices) = history(&["a"]);
        let pipeline = Pipeline::new(PipelineConfig::new().with_horizon_hours(24)).unwrap();
        let horizon = hourly_horizon_with_steps(&history, 24).unwrap();
        let template = WideTable::empty(horizon, names(&["a"])).unwrap();

        let submission = pipeline
            .run_hourly(&history, &prices, &template, &registry())
            .unwrap();
        assert_eq!(submission.horizon.len(), 24);
        assert_eq!(submission.table.n_rows(), 24);
    }

    #[test]
    fn monthly_run_follows_template_order() {
        let (history, _) = history(&["a", "b"]);
        let months: Vec<_> = (1..=12)
            .map(|m| Tz::UTC.with_ymd_and_hms(2025, m, 1, 0, 0, 0).unwrap())
            .collect();
        let template = WideTable::empty(months, names(&["b", "a"])).unwrap();

        let submission = Pipeline::default()
            .run_monthly(&history, &template, &registry())
            .unwrap();
        assert_eq!(submission.horizon.len(), 12);
        assert_eq!(submission.table.columns(), &names(&["b", "a"])[..]);
        assert_eq!(submission.table.column("b").unwrap()[11], 3.0);
    }

    #[test]
    fn empty_history_is_fatal() {
        let empty = WideTable::empty(vec![], names(&["a"])).unwrap();
        let prices = TimeSeries::new(vec![], vec![]).unwrap();
        assert_eq!(
            Pipeline::default()
                .run_hourly(&empty, &prices, &empty, &registry())
                .err(),
            Some(ForecastError::EmptyHistory)
        );
    }

    #[test]
    fn write_hourly_lands_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (history, prices) = history(&["a"]);
        let horizon = hourly_horizon_with_steps(&history, 48).unwrap();
        let template = WideTable::empty(horizon, names(&["a"])).unwrap();

        let pipeline = Pipeline::new(PipelineConfig::new().with_output_dir(dir.path())).unwrap();
        let (_, path) = pipeline
            .write_hourly(&history, &prices, &template, &registry())
            .unwrap();

        assert_eq!(path, dir.path().join("forecast_48h_submission.csv"));
        assert!(path.is_file());
    }

    #[test]
    fn write_monthly_lands_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (history, _) = history(&["a"]);
        let months: Vec<_> = (1..=12)
            .map(|m| Tz::UTC.with_ymd_and_hms(2025, m, 1, 0, 0, 0).unwrap())
            .collect();
        let template = WideTable::empty(months, names(&["a"])).unwrap();

        let pipeline = Pipeline::new(PipelineConfig::new().with_output_dir(dir.path())).unwrap();
        let (submission, path) = pipeline
            .write_monthly(&history, &template, &registry())
            .unwrap();

        assert_eq!(path, pipeline.config().monthly_output_path());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + submission.table.n_rows());
        assert!(text.lines().nth(1).unwrap().ends_with(";2"));
    }

    #[test]
    fn artifact_sources_use_configured_dirs() {
        let pipeline =
            Pipeline::new(PipelineConfig::new().with_model_dirs("m/48h", "m/12m")).unwrap();
        let loader = |_: &Path| -> Result<BoxedForecaster> { Ok(Box::new(Constant(0.0))) };
        assert_eq!(
            pipeline.hourly_artifacts(loader).artifact_path("7"),
            PathBuf::from("m/48h/group_7.pkl")
        );
        assert_eq!(
            pipeline.monthly_artifacts(loader).artifact_path("7"),
            PathBuf::from("m/12m/group_7.pkl")
        );
    }
}
