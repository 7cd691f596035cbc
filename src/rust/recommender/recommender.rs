use std::sync::Arc;
use serde::Serialize;

use super::error::RecommendError;
use super::predict::{CareerPredictor, Prediction};
use super::ranking::{filter_and_rank, RankedJob};
use crate::dataset::Dataset;
use crate::profile::Profile;

pub const NO_MATCH_MESSAGE: &str = "No job recommendations match your criteria.";

/// Everything one form submission produces.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub prediction: Prediction,
    /// Matching dataset rows, best overlap first
    pub jobs: Vec<RankedJob>,
}

impl Recommendation {
    /// The category of every matching row, in ranked order.
    pub fn categories(&self) -> Vec<&str> {
        self.jobs.iter().map(RankedJob::category).collect()
    }

    /// Inline warnings to show next to the results.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Prediction::FeatureMismatch { .. } = self.prediction {
            warnings.push(self.prediction.to_string());
        }
        if self.jobs.is_empty() {
            warnings.push(NO_MATCH_MESSAGE.to_string());
        }
        warnings
    }
}

/// Summary of what a Recommender was loaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommenderInfo {
    pub dataset_rows: usize,
    pub majors: usize,
    pub vectorizer_features: usize,
    pub scaler_features: usize,
}

/// Recommends jobs from a profile using the loaded dataset and career
/// predictor. Immutable once built and shared read-only.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use careerlens::{ArtifactStore, Gender, Profile, Recommender, RecommenderConfig};
///
/// let store = ArtifactStore::new(RecommenderConfig::with_artifact_dir("models"));
/// let recommender = Recommender::builder()
///     .with_artifacts(&store)?
///     .with_dataset(store.load_dataset()?)
///     .build()?;
///
/// let profile = Profile::new(Gender::Female, "Computer Science")
///     .with_interests("ai, data science")
///     .with_skills("python, sql");
/// let recommendation = recommender.recommend(&profile)?;
/// println!("{}", recommendation.prediction);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Recommender {
    predictor: CareerPredictor,
    dataset: Arc<Dataset>,
}

// Compile-time verification of thread-safety
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Recommender>();
};

impl Recommender {
    /// Creates a new RecommenderBuilder for fluent construction
    pub fn builder() -> super::builder::RecommenderBuilder {
        super::builder::RecommenderBuilder::new()
    }

    pub(crate) fn new(predictor: CareerPredictor, dataset: Arc<Dataset>) -> Self {
        Self { predictor, dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The majors a user can choose from.
    pub fn majors(&self) -> Vec<&str> {
        self.dataset.majors()
    }

    pub fn info(&self) -> RecommenderInfo {
        RecommenderInfo {
            dataset_rows: self.dataset.len(),
            majors: self.dataset.majors().len(),
            vectorizer_features: self.predictor.encoder().num_features(),
            scaler_features: self.predictor.normalizer().expected_features(),
        }
    }

    fn validate(&self, profile: &Profile) -> Result<(), RecommendError> {
        profile.validate()?;
        if !self.dataset.has_major(&profile.major) {
            return Err(RecommendError::ValidationError(format!(
                "Unknown major '{}'. Choose one of: {}",
                profile.major,
                self.majors().join(", ")
            )));
        }
        Ok(())
    }

    /// Filters and ranks the dataset for `profile` and predicts its career category.
    ///
    /// Incomplete profiles are rejected before any filtering. A feature
    /// mismatch in the prediction does not prevent the ranking.
    pub fn recommend(&self, profile: &Profile) -> Result<Recommendation, RecommendError> {
        self.validate(profile)?;

        let jobs = filter_and_rank(&self.dataset, profile);
        let prediction = self.predictor.predict(profile)?;
        log::info!("{} jobs recommended; {:?}", jobs.len(), prediction);

        Ok(Recommendation { prediction, jobs })
    }

    /// Predicts the career category alone.
    pub fn predict(&self, profile: &Profile) -> Result<Prediction, RecommendError> {
        profile.validate()?;
        self.predictor.predict(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings() {
        let empty = Recommendation {
            prediction: Prediction::FeatureMismatch { input_features: 10, expected_features: 12 },
            jobs: vec![],
        };
        let warnings = empty.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("10") && warnings[0].contains("12"));
        assert_eq!(warnings[1], NO_MATCH_MESSAGE);

        let fine = Recommendation { prediction: Prediction::Category("Data".into()), jobs: vec![] };
        assert_eq!(fine.warnings(), vec![NO_MATCH_MESSAGE.to_string()]);
    }
}
