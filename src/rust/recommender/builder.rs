use std::sync::Arc;
use log::{error, info};

use super::encoder::TextEncoder;
use super::error::RecommendError;
use super::knn::LabelClassifier;
use super::predict::CareerPredictor;
use super::recommender::Recommender;
use super::scaler::Normalizer;
use crate::artifact_store::ArtifactStore;
use crate::dataset::Dataset;

/// A builder for constructing a Recommender with a fluent interface.
#[derive(Default)]
pub struct RecommenderBuilder {
    encoder: Option<Arc<dyn TextEncoder>>,
    normalizer: Option<Arc<dyn Normalizer>>,
    classifier: Option<Arc<dyn LabelClassifier>>,
    dataset: Option<Dataset>,
}

impl RecommenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the vectorizer, scaler and classifier from an artifact store
    ///
    /// # Errors
    /// * `BuildError` if components were already set
    /// * `Artifact` if any artifact is missing or malformed
    ///
    /// # Example
    /// ```no_run
    /// use careerlens::{ArtifactStore, Recommender, RecommenderConfig};
    ///
    /// let store = ArtifactStore::new(RecommenderConfig::with_artifact_dir("models"));
    /// let builder = Recommender::builder().with_artifacts(&store);
    /// ```
    pub fn with_artifacts(self, store: &ArtifactStore) -> Result<Self, RecommendError> {
        if self.encoder.is_some() || self.normalizer.is_some() || self.classifier.is_some() {
            return Err(RecommendError::BuildError("Model components already set".to_string()));
        }

        let missing = store.missing_artifacts();
        if !missing.is_empty() {
            error!("Missing artifacts: {:?}", missing);
        }

        let vectorizer = store.load_vectorizer()?;
        let scaler = store.load_scaler()?;
        let classifier = store.load_classifier()?;
        info!("Artifacts loaded from {:?}", store.artifact_dir());

        self.with_components(Arc::new(vectorizer), Arc::new(scaler), Arc::new(classifier))
    }

    /// Sets the three pipeline stages directly.
    ///
    /// The scaler and classifier must agree on dimensionality; the
    /// vectorizer is allowed to disagree, which surfaces per request as
    /// a feature mismatch rather than failing the build.
    pub fn with_components(
        mut self,
        encoder: Arc<dyn TextEncoder>,
        normalizer: Arc<dyn Normalizer>,
        classifier: Arc<dyn LabelClassifier>,
    ) -> Result<Self, RecommendError> {
        if normalizer.expected_features() != classifier.num_features() {
            return Err(RecommendError::BuildError(format!(
                "Scaler expects {} features but the classifier was trained on {}",
                normalizer.expected_features(),
                classifier.num_features()
            )));
        }
        if encoder.num_features() != normalizer.expected_features() {
            log::warn!(
                "Vectorizer produces {} features but the scaler expects {}; predictions will be skipped",
                encoder.num_features(),
                normalizer.expected_features()
            );
        }
        self.encoder = Some(encoder);
        self.normalizer = Some(normalizer);
        self.classifier = Some(classifier);
        Ok(self)
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        if dataset.is_empty() {
            log::warn!("Dataset has no rows; every search will come back empty");
        }
        self.dataset = Some(dataset);
        self
    }

    /// Builds and returns the final Recommender instance
    ///
    /// # Errors
    /// * `BuildError` if the model components or the dataset were not set
    pub fn build(self) -> Result<Recommender, RecommendError> {
        let encoder = self.encoder
            .ok_or_else(|| RecommendError::BuildError("No vectorizer loaded".into()))?;
        let normalizer = self.normalizer
            .ok_or_else(|| RecommendError::BuildError("No scaler loaded".into()))?;
        let classifier = self.classifier
            .ok_or_else(|| RecommendError::BuildError("No classifier loaded".into()))?;
        let dataset = self.dataset
            .ok_or_else(|| RecommendError::BuildError("No dataset loaded".into()))?;

        Ok(Recommender::new(
            CareerPredictor::new(encoder, normalizer, classifier),
            Arc::new(dataset),
        ))
    }
}
