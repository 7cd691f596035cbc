use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::RecommendError;

/// Maps a raw feature vector into the normalised space the classifier was trained in.
pub trait Normalizer: Send + Sync {
    /// Number of input features the normaliser was fitted on
    fn expected_features(&self) -> usize;

    /// Normalises `features`. Callers check the length against
    /// `expected_features()` first.
    fn transform(&self, features: &Array1<f64>) -> Array1<f64>;
}

/// Fitted scaling parameters, tagged by `kind` in the artifact file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
    },
    /// `x * scale + min`
    MinMax {
        min: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
    },
}

impl FeatureScaler {
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, RecommendError> {
        let scaler = Self::Standard { mean, scale, feature_names_in: None };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn min_max(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, RecommendError> {
        let scaler = Self::MinMax { min, scale, feature_names_in: None };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Checks that the parameter vectors agree in length.
    pub fn validate(&self) -> Result<(), RecommendError> {
        let (offset, scale, names) = match self {
            Self::Standard { mean, scale, feature_names_in } => (mean, scale, feature_names_in),
            Self::MinMax { min, scale, feature_names_in } => (min, scale, feature_names_in),
        };
        if offset.len() != scale.len() {
            return Err(RecommendError::BuildError(format!(
                "Scaler parameter lengths differ: {} offsets vs {} scales",
                offset.len(), scale.len()
            )));
        }
        if let Some(names) = names {
            if names.len() != scale.len() {
                return Err(RecommendError::BuildError(format!(
                    "Scaler lists {} feature names but has {} parameters",
                    names.len(), scale.len()
                )));
            }
        }
        Ok(())
    }
}

impl Normalizer for FeatureScaler {
    fn expected_features(&self) -> usize {
        match self {
            Self::Standard { feature_names_in: Some(names), .. }
            | Self::MinMax { feature_names_in: Some(names), .. } => names.len(),
            Self::Standard { scale, .. } | Self::MinMax { scale, .. } => scale.len(),
        }
    }

    fn transform(&self, features: &Array1<f64>) -> Array1<f64> {
        match self {
            Self::Standard { mean, scale, .. } => features
                .iter()
                .zip(mean.iter().zip(scale))
                // zero variance columns are left centred but unscaled
                .map(|(&x, (&m, &s))| if s == 0.0 { x - m } else { (x - m) / s })
                .collect(),
            Self::MinMax { min, scale, .. } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(&x, (&lo, &s))| x * s + lo)
                .collect(),
        }
    }
}
