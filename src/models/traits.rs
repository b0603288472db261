//! Forecaster capability and per-group model resolution.

use crate::core::Forecast;
use crate::error::{ForecastError, Result};
use crate::features::ExogenousFeatureSet;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A trained per-group model that predicts from future regressors.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Predict `steps` values in horizon order from the horizon's regressors.
    fn predict(&self, steps: usize, exog: &ExogenousFeatureSet) -> Result<Forecast>;

    /// Stored correction added to every raw prediction.
    fn residual_bias(&self) -> f64 {
        0.0
    }

    /// Get the model name.
    fn name(&self) -> &str;
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

/// Resolves the trained model for a group.
pub trait ModelSource {
    /// `Ok(None)` when the group has no model; `Err` when one exists but
    /// cannot be loaded.
    fn load(&self, group: &str) -> Result<Option<BoxedForecaster>>;
}

type Factory = Box<dyn Fn() -> Result<BoxedForecaster> + Send + Sync>;

/// Model specification: how to materialize one group's forecaster.
///
/// # Example
///
/// ```
/// use loadcast::core::Forecast;
/// use loadcast::features::ExogenousFeatureSet;
/// use loadcast::models::{Forecaster, ModelRegistry, ModelSource, ModelSpec};
///
/// struct Flat(f64);
///
/// impl Forecaster for Flat {
///     fn predict(&self, steps: usize, _: &ExogenousFeatureSet) -> loadcast::Result<Forecast> {
///         Ok(Forecast::from_values(vec![self.0; steps]))
///     }
///     fn name(&self) -> &str {
///         "Flat"
///     }
/// }
///
/// let mut registry = ModelRegistry::new();
/// registry.register(ModelSpec::new("28", || Ok(Box::new(Flat(1.0)))));
///
/// assert!(registry.load("28").unwrap().is_some());
/// assert!(registry.load("29").unwrap().is_none());
/// ```
pub struct ModelSpec {
    /// Group the model was trained for.
    pub group: String,
    factory: Factory,
}

impl ModelSpec {
    pub fn new<F>(group: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<BoxedForecaster> + Send + Sync + 'static,
    {
        Self {
            group: group.into(),
            factory: Box::new(factory),
        }
    }

    /// Create a new model instance.
    pub fn create(&self) -> Result<BoxedForecaster> {
        (self.factory)()
    }
}

impl fmt::Debug for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSpec")
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// In-memory model source keyed by group.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelSpec>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model specification, replacing any previous one for the group.
    pub fn register(&mut self, spec: ModelSpec) {
        self.models.insert(spec.group.clone(), spec);
    }
}

impl ModelSource for ModelRegistry {
    fn load(&self, group: &str) -> Result<Option<BoxedForecaster>> {
        self.models
            .get(group)
            .map(|spec| spec.create().map_err(|e| as_load_error(group, e)))
            .transpose()
    }
}

/// Directory of per-group artifacts named `group_<id>.<extension>`.
///
/// Decoding is delegated to `loader`, so the artifact format stays outside
/// this crate.
pub struct ArtifactDirectory<L> {
    dir: PathBuf,
    extension: String,
    loader: L,
}

impl<L> ArtifactDirectory<L>
where
    L: Fn(&Path) -> Result<BoxedForecaster>,
{
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, loader: L) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            loader,
        }
    }

    /// Path where a group's artifact is expected.
    pub fn artifact_path(&self, group: &str) -> PathBuf {
        self.dir.join(format!("group_{group}.{}", self.extension))
    }
}

impl<L> ModelSource for ArtifactDirectory<L>
where
    L: Fn(&Path) -> Result<BoxedForecaster>,
{
    fn load(&self, group: &str) -> Result<Option<BoxedForecaster>> {
        let path = self.artifact_path(group);
        if !path.is_file() {
            return Ok(None);
        }
        (self.loader)(&path)
            .map(Some)
            .map_err(|e| as_load_error(group, e))
    }
}

impl<L> fmt::Debug for ArtifactDirectory<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactDirectory")
            .field("dir", &self.dir)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

fn as_load_error(group: &str, err: ForecastError) -> ForecastError {
    match err {
        ForecastError::ModelLoad { .. } => err,
        other => ForecastError::ModelLoad {
            group: group.to_string(),
            reason: other.to_string(),
        },
    }
}
