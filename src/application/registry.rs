//! Model registry: the single ownership container for every trained
//! artifact the process serves.
//!
//! Built once at startup, never mutated afterwards, and passed by shared
//! immutable reference (`Arc`) into every request handler. All consuming
//! operations are read-only, so concurrent requests need no locking.
//! Teardown is simply dropping the container.

use std::collections::BTreeMap;

use crate::domain::{AucTable, ColumnManifest, Disease};
use crate::ports::{CategoryEncoder, Classifier, FeatureScaler, Regressor};
use crate::{PawsightError, Result};

/// One classifier family: per-disease classifiers plus the preprocessing
/// artifacts and manifest they were trained with.
#[derive(Debug)]
pub struct ClassifierFamily<C, S, E> {
    pub classifiers: BTreeMap<Disease, C>,
    pub scaler: S,
    pub encoders: BTreeMap<String, E>,
    pub manifest: ColumnManifest,
    pub auc: AucTable,
}

impl<C: Classifier, S: FeatureScaler, E: CategoryEncoder> ClassifierFamily<C, S, E> {
    /// Look up the classifier for a disease.
    ///
    /// # Errors
    /// Returns [`PawsightError::ModelNotLoaded`] if the family is missing
    /// that disease's artifact.
    pub fn classifier(&self, disease: Disease) -> Result<&C> {
        self.classifiers
            .get(&disease)
            .ok_or_else(|| PawsightError::ModelNotLoaded(format!("{disease} classifier")))
    }
}

/// The lifespan regressor and its training-time column manifest.
#[derive(Debug)]
pub struct LifespanModel<R> {
    pub regressor: R,
    pub manifest: ColumnManifest,
}

/// Everything the process serves, loaded once.
///
/// The detailed family is optional: deployments that only ship the
/// 19-feature screening models still answer standard requests.
#[derive(Debug)]
pub struct ModelRegistry<C, R, S, E> {
    pub basic: ClassifierFamily<C, S, E>,
    pub detailed: Option<ClassifierFamily<C, S, E>>,
    pub lifespan: LifespanModel<R>,
}

impl<C, R, S, E> ModelRegistry<C, R, S, E>
where
    C: Classifier,
    R: Regressor,
    S: FeatureScaler,
    E: CategoryEncoder,
{
    #[must_use]
    pub fn new(
        basic: ClassifierFamily<C, S, E>,
        detailed: Option<ClassifierFamily<C, S, E>>,
        lifespan: LifespanModel<R>,
    ) -> Self {
        tracing::info!(
            basic_features = basic.manifest.len(),
            detailed_loaded = detailed.is_some(),
            lifespan_features = lifespan.manifest.len(),
            "Model registry constructed"
        );
        Self {
            basic,
            detailed,
            lifespan,
        }
    }

    /// The detailed family, or a configuration error if not deployed.
    pub fn detailed(&self) -> Result<&ClassifierFamily<C, S, E>> {
        self.detailed.as_ref().ok_or_else(|| {
            PawsightError::ModelNotLoaded("detailed classifier family".to_string())
        })
    }
}
