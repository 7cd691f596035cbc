use crate::artifact_store::ArtifactError;
use crate::dataset::DatasetError;

/// Represents the different types of errors that can occur while producing a recommendation.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// A model artifact could not be loaded or is malformed
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
    /// The job dataset could not be loaded
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred while making predictions
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// The submitted profile is incomplete or out of range
    #[error("{0}")]
    ValidationError(String),
}

impl RecommendError {
    /// True for errors the user can fix by changing the form input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
