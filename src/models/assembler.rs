//! Per-group forecast assembly.
//!
//! Each group's model is resolved, asked for a prediction over the horizon,
//! bias-corrected and written into its own column. Groups are independent:
//! a missing model leaves the column empty and a failing model is recorded
//! without stopping the batch.

use crate::core::WideTable;
use crate::error::{ForecastError, Result};
use crate::features::ExogenousFeatureSet;
use crate::models::baseline::LagBaseline;
use crate::models::traits::ModelSource;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, warn};

/// What the hourly assembler writes for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlyComposition {
    /// The bias-corrected model prediction alone.
    #[default]
    ResidualOnly,
    /// Weekly baseline plus the bias-corrected prediction.
    BaselinePlusResidual,
}

/// Result of forecasting one group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome {
    /// Column written.
    Forecast,
    /// No model for the group; column left empty.
    NoModel,
    /// Model failed to load or predict; column left empty.
    Failed(ForecastError),
}

/// Outcome per group, in forecasting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyReport {
    outcomes: Vec<(String, GroupOutcome)>,
}

impl AssemblyReport {
    fn record(&mut self, group: &str, outcome: GroupOutcome) {
        self.outcomes.push((group.to_string(), outcome));
    }

    pub fn outcome(&self, group: &str) -> Option<&GroupOutcome> {
        self.outcomes
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, o)| o)
    }

    /// Groups whose column was written.
    pub fn forecasted(&self) -> Vec<&str> {
        self.filter(|o| matches!(o, GroupOutcome::Forecast))
    }

    /// Groups without a model.
    pub fn missing_models(&self) -> Vec<&str> {
        self.filter(|o| matches!(o, GroupOutcome::NoModel))
    }

    /// Groups whose model failed, with the error.
    pub fn failures(&self) -> Vec<(&str, &ForecastError)> {
        self.outcomes
            .iter()
            .filter_map(|(g, o)| match o {
                GroupOutcome::Failed(e) => Some((g.as_str(), e)),
                _ => None,
            })
            .collect()
    }

    fn filter(&self, pred: impl Fn(&GroupOutcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| pred(o))
            .map(|(g, _)| g.as_str())
            .collect()
    }
}

/// Forecast table plus what happened to each group.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub forecast: WideTable,
    pub report: AssemblyReport,
}

/// Runs every group's model over a horizon.
#[derive(Debug)]
pub struct ForecastAssembler<'a, S: ?Sized> {
    source: &'a S,
    composition: HourlyComposition,
    baseline: LagBaseline,
}

impl<'a, S: ModelSource + ?Sized> ForecastAssembler<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            composition: HourlyComposition::default(),
            baseline: LagBaseline::weekly(),
        }
    }

    pub fn with_composition(mut self, composition: HourlyComposition) -> Self {
        self.composition = composition;
        self
    }

    pub fn with_baseline(mut self, baseline: LagBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Hourly horizon: model prediction, combined with the lag baseline when
    /// the composition asks for it.
    pub fn assemble_hourly(
        &self,
        groups: &[String],
        horizon: &[DateTime<Tz>],
        exog: &ExogenousFeatureSet,
        history: &WideTable,
    ) -> Result<Assembly> {
        let baseline = match self.composition {
            HourlyComposition::ResidualOnly => None,
            HourlyComposition::BaselinePlusResidual => {
                Some(self.baseline.compose(history, horizon)?)
            }
        };
        self.assemble(groups, horizon, exog, baseline.as_ref())
    }

    /// Monthly horizon: model prediction only.
    pub fn assemble_monthly(
        &self,
        groups: &[String],
        horizon: &[DateTime<Tz>],
        exog: &ExogenousFeatureSet,
    ) -> Result<Assembly> {
        self.assemble(groups, horizon, exog, None)
    }

    /// Forecast every group; `baseline`, when given, is added per group.
    pub fn assemble(
        &self,
        groups: &[String],
        horizon: &[DateTime<Tz>],
        exog: &ExogenousFeatureSet,
        baseline: Option<&WideTable>,
    ) -> Result<Assembly> {
        if exog.len() != horizon.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: horizon.len(),
                got: exog.len(),
            });
        }

        let mut forecast = WideTable::empty(horizon.to_vec(), groups.to_vec())?;
        let mut report = AssemblyReport::default();
        let total = groups.len();

        for (idx, group) in groups.iter().enumerate() {
            let position = idx + 1;
            match self.forecast_group(group, horizon.len(), exog) {
                Ok(Some(mut values)) => {
                    if let Some(column) = baseline.and_then(|b| b.column(group)) {
                        for (v, b) in values.iter_mut().zip(column) {
                            *v += b;
                        }
                    }
                    forecast.set_column(group, values)?;
                    debug!(group = %group, position, total, "group forecasted");
                    report.record(group, GroupOutcome::Forecast);
                }
                Ok(None) => {
                    debug!(group = %group, position, total, "no model for group, leaving forecast empty");
                    report.record(group, GroupOutcome::NoModel);
                }
                Err(err) => {
                    warn!(group = %group, position, total, error = %err, "group forecast failed");
                    report.record(group, GroupOutcome::Failed(err));
                }
            }
        }

        Ok(Assembly { forecast, report })
    }

    /// Bias-corrected prediction for one group; `None` without a model.
    fn forecast_group(
        &self,
        group: &str,
        steps: usize,
        exog: &ExogenousFeatureSet,
    ) -> Result<Option<Vec<f64>>> {
        let Some(model) = self.source.load(group)? else {
            return Ok(None);
        };

        let prediction_error = |reason: String| ForecastError::Prediction {
            group: group.to_string(),
            reason,
        };
        let raw = model
            .predict(steps, exog)
            .map_err(|e| prediction_error(e.to_string()))?;
        raw.expect_horizon(steps)
            .map_err(|e| prediction_error(e.to_string()))?;

        Ok(Some(raw.shifted(model.residual_bias()).into_values()))
    }
}
