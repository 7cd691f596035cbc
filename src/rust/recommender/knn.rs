use std::cmp::Ordering;
use std::collections::HashMap;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::error::RecommendError;

/// Maps a normalised feature vector to a single label.
pub trait LabelClassifier: Send + Sync {
    /// Dimensionality of the vectors the classifier accepts
    fn num_features(&self) -> usize;

    fn predict(&self, features: &Array1<f64>) -> Result<String, RecommendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    Cosine,
}

impl DistanceMetric {
    pub fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        match self {
            Self::Euclidean => a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt(),
            Self::Manhattan => a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum(),
            Self::Cosine => {
                let na = a.dot(&a).sqrt();
                let nb = b.dot(&b).sqrt();
                if na < 1e-12 || nb < 1e-12 {
                    1.0
                } else {
                    1.0 - a.dot(&b) / (na * nb)
                }
            }
        }
    }
}

/// Serialized form of a fitted nearest-neighbour model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnArtifact {
    pub k: usize,
    #[serde(default)]
    pub metric: DistanceMetric,
    pub samples: Vec<Vec<f64>>,
    pub labels: Vec<String>,
}

/// A k-nearest-neighbour classifier over stored training vectors.
///
/// Prediction is a majority vote among the `k` closest samples. When several
/// labels share the top vote count, the label of the closest voter wins.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    k: usize,
    metric: DistanceMetric,
    samples: ndarray::Array2<f64>,
    labels: Vec<String>,
}

impl KNearestNeighbors {
    pub fn from_artifact(artifact: KnnArtifact) -> Result<Self, RecommendError> {
        let KnnArtifact { k, metric, samples, labels } = artifact;

        if k == 0 {
            return Err(RecommendError::BuildError("Neighbour count k must be at least 1".into()));
        }
        if samples.is_empty() {
            return Err(RecommendError::BuildError("Classifier has no stored training samples".into()));
        }
        if samples.len() != labels.len() {
            return Err(RecommendError::BuildError(format!(
                "Classifier has {} samples but {} labels",
                samples.len(), labels.len()
            )));
        }
        let width = samples[0].len();
        if let Some(pos) = samples.iter().position(|s| s.len() != width) {
            return Err(RecommendError::BuildError(format!(
                "Training sample {} has {} features, expected {}",
                pos, samples[pos].len(), width
            )));
        }

        let flat: Vec<f64> = samples.into_iter().flatten().collect();
        let samples = ndarray::Array2::from_shape_vec((labels.len(), width), flat)
            .map_err(|e| RecommendError::BuildError(format!("Failed to shape training samples: {}", e)))?;

        Ok(Self { k, metric, samples, labels })
    }

    /// Replaces the neighbour count the model was exported with.
    pub fn with_k(mut self, k: usize) -> Result<Self, RecommendError> {
        if k == 0 {
            return Err(RecommendError::BuildError("Neighbour count k must be at least 1".into()));
        }
        self.k = k;
        Ok(self)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn num_samples(&self) -> usize {
        self.labels.len()
    }

    /// Returns `(sample index, distance)` of the nearest samples, closest first.
    pub fn neighbors(&self, features: &Array1<f64>) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self.samples
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| (i, self.metric.distance(row, features.view())))
            .collect();
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        distances.truncate(self.k.min(self.labels.len()));
        distances
    }
}

impl LabelClassifier for KNearestNeighbors {
    fn num_features(&self) -> usize {
        self.samples.ncols()
    }

    fn predict(&self, features: &Array1<f64>) -> Result<String, RecommendError> {
        if features.len() != self.num_features() {
            return Err(RecommendError::PredictionError(format!(
                "Classifier expects {} features, got {}",
                self.num_features(), features.len()
            )));
        }
        if features.iter().any(|x| !x.is_finite()) {
            return Err(RecommendError::PredictionError("Feature vector contains non-finite values".into()));
        }

        let neighbors = self.neighbors(features);

        // label -> (votes, rank of its closest voter)
        let mut votes: HashMap<&str, (usize, usize)> = HashMap::new();
        for (rank, (idx, _)) in neighbors.iter().enumerate() {
            let entry = votes.entry(self.labels[*idx].as_str()).or_insert((0, rank));
            entry.0 += 1;
        }

        votes.into_iter()
            .max_by(|a, b| (a.1).0.cmp(&(b.1).0).then((b.1).1.cmp(&(a.1).1)))
            .map(|(label, _)| label.to_string())
            .ok_or_else(|| RecommendError::PredictionError("No neighbours found".into()))
    }
}
