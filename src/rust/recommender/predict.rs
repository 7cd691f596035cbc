use std::fmt;
use std::sync::Arc;
use serde::Serialize;

use crate::profile::Profile;
use super::encoder::TextEncoder;
use super::error::RecommendError;
use super::knn::LabelClassifier;
use super::scaler::Normalizer;

/// Outcome of the career category prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Prediction {
    /// The classifier's label
    Category(String),
    /// The encoded text did not have the length the scaler was fitted on
    FeatureMismatch {
        input_features: usize,
        expected_features: usize,
    },
}

impl Prediction {
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Category(label) => Some(label),
            Self::FeatureMismatch { .. } => None,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(label) => write!(f, "Predicted Career Category: {}", label),
            Self::FeatureMismatch { input_features, expected_features } => write!(
                f,
                "Input feature count does not match. The input has {} features, but the scaler expects {} features.",
                input_features, expected_features
            ),
        }
    }
}

/// The text → vector → normalised vector → label pipeline.
///
/// All three stages are shared read-only; cloning the predictor is cheap.
#[derive(Clone)]
pub struct CareerPredictor {
    encoder: Arc<dyn TextEncoder>,
    normalizer: Arc<dyn Normalizer>,
    classifier: Arc<dyn LabelClassifier>,
}

impl fmt::Debug for CareerPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CareerPredictor")
            .field("encoder_features", &self.encoder.num_features())
            .field("normalizer_features", &self.normalizer.expected_features())
            .field("classifier_features", &self.classifier.num_features())
            .finish()
    }
}

impl CareerPredictor {
    pub fn new(
        encoder: Arc<dyn TextEncoder>,
        normalizer: Arc<dyn Normalizer>,
        classifier: Arc<dyn LabelClassifier>,
    ) -> Self {
        Self { encoder, normalizer, classifier }
    }

    pub fn encoder(&self) -> &dyn TextEncoder {
        self.encoder.as_ref()
    }

    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }

    /// Predicts a career category from the profile's free text.
    ///
    /// A vectorizer/scaler dimension mismatch is not an error: it yields
    /// [`Prediction::FeatureMismatch`] so callers can still show the ranking.
    pub fn predict(&self, profile: &Profile) -> Result<Prediction, RecommendError> {
        self.predict_text(&profile.combined_text())
    }

    pub fn predict_text(&self, text: &str) -> Result<Prediction, RecommendError> {
        let encoded = self.encoder.transform(text);
        let input_features = encoded.len();
        let expected_features = self.normalizer.expected_features();

        if input_features != expected_features {
            log::warn!(
                "Feature mismatch: vectorizer produced {} features, scaler expects {}",
                input_features, expected_features
            );
            return Ok(Prediction::FeatureMismatch { input_features, expected_features });
        }

        let normalized = self.normalizer.transform(&encoded);
        let label = self.classifier.predict(&normalized)?;
        log::debug!("Predicted career category '{}'", label);
        Ok(Prediction::Category(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use ndarray::Array1;
    use crate::profile::Gender;
    use crate::recommender::encoder::TfidfVectorizer;
    use crate::recommender::knn::{DistanceMetric, KNearestNeighbors, KnnArtifact};
    use crate::recommender::scaler::FeatureScaler;

    struct FixedWidth(usize);

    impl TextEncoder for FixedWidth {
        fn num_features(&self) -> usize {
            self.0
        }

        fn transform(&self, _text: &str) -> Array1<f64> {
            Array1::zeros(self.0)
        }
    }

    fn pipeline(encoder: Arc<dyn TextEncoder>) -> CareerPredictor {
        let scaler = FeatureScaler::standard(vec![0.0; 2], vec![1.0; 2]).unwrap();
        let knn = KNearestNeighbors::from_artifact(KnnArtifact {
            k: 1,
            metric: DistanceMetric::Euclidean,
            samples: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            labels: vec!["Data Science".into(), "Software Engineering".into()],
        })
        .unwrap();
        CareerPredictor::new(encoder, Arc::new(scaler), Arc::new(knn))
    }

    fn vectorizer() -> TfidfVectorizer {
        let vocabulary = HashMap::from([("data".to_string(), 0), ("rust".to_string(), 1)]);
        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_predicts_nearest_category() {
        let predictor = pipeline(Arc::new(vectorizer()));
        assert_eq!(
            predictor.predict_text("data analysis").unwrap(),
            Prediction::Category("Data Science".into())
        );
        assert_eq!(
            predictor.predict_text("rust systems").unwrap().category(),
            Some("Software Engineering")
        );
    }

    #[test]
    fn test_mismatch_reports_both_counts() {
        let predictor = pipeline(Arc::new(FixedWidth(5)));
        let profile = Profile::new(Gender::Female, "Economics").with_interests("finance").with_skills("excel");
        let prediction = predictor.predict(&profile).unwrap();
        assert_eq!(prediction, Prediction::FeatureMismatch { input_features: 5, expected_features: 2 });
        assert!(prediction.category().is_none());
        let message = prediction.to_string();
        assert!(message.contains('5'));
        assert!(message.contains('2'));
    }
}
