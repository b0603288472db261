//! Forecast result structure returned by a group forecaster.

use crate::error::{ForecastError, Result};

/// Point predictions for one group, in horizon order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    /// Predicted mean per step.
    predicted_mean: Vec<f64>,
}

impl Forecast {
    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            predicted_mean: values,
        }
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.predicted_mean.len()
    }

    /// Point predictions.
    pub fn predicted_mean(&self) -> &[f64] {
        &self.predicted_mean
    }

    /// Consume into the point predictions.
    pub fn into_values(self) -> Vec<f64> {
        self.predicted_mean
    }

    /// Add a constant to every step.
    pub fn shifted(mut self, offset: f64) -> Self {
        for v in &mut self.predicted_mean {
            *v += offset;
        }
        self
    }

    /// Check the forecast covers exactly `steps` steps.
    pub fn expect_horizon(&self, steps: usize) -> Result<()> {
        if self.horizon() != steps {
            return Err(ForecastError::DimensionMismatch {
                expected: steps,
                got: self.horizon(),
            });
        }
        Ok(())
    }
}
