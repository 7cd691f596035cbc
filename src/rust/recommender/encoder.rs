use std::collections::HashMap;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::RecommendError;
use super::utils::{l1_normalize, l2_normalize};

/// Converts free text into a fixed-length numeric feature vector.
///
/// Implementations must be deterministic: the same text always yields the
/// same vector, and every vector has length `num_features()`.
pub trait TextEncoder: Send + Sync {
    /// Number of features every encoded vector has
    fn num_features(&self) -> usize;

    /// Encodes `text` into a feature vector
    fn transform(&self, text: &str) -> Array1<f64>;
}

/// Vector normalisation applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

fn default_lowercase() -> bool {
    true
}

/// A pre-fitted TF-IDF vectorizer.
///
/// Tokens are runs of two or more alphanumeric or underscore characters.
/// Term frequency is the raw count (or `1 + ln(count)` with `sublinear_tf`),
/// multiplied by the fitted IDF weight and normalised per `norm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to feature index mapping
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub norm: Norm,
    #[serde(default)]
    pub sublinear_tf: bool,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self, RecommendError> {
        let vectorizer = Self {
            vocabulary,
            idf,
            lowercase: true,
            norm: Norm::L2,
            sublinear_tf: false,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Checks that every vocabulary index addresses an IDF weight.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.idf.is_empty() {
            return Err(RecommendError::BuildError("Vectorizer has an empty IDF table".into()));
        }
        let len = self.idf.len();
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= len) {
            return Err(RecommendError::BuildError(format!(
                "Vocabulary term '{}' maps to index {} but only {} IDF weights exist",
                term, idx, len
            )));
        }
        Ok(())
    }

    /// Splits text into vocabulary-style tokens.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<std::borrow::Cow<'a, str>> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= 2)
            .map(|t| {
                if self.lowercase {
                    std::borrow::Cow::Owned(t.to_lowercase())
                } else {
                    std::borrow::Cow::Borrowed(t)
                }
            })
            .collect()
    }
}

impl TextEncoder for TfidfVectorizer {
    fn num_features(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, text: &str) -> Array1<f64> {
        let mut tf = Array1::<f64>::zeros(self.idf.len());
        for token in self.tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token.as_ref()) {
                tf[idx] += 1.0;
            }
        }

        if self.sublinear_tf {
            tf.mapv_inplace(|x| if x > 0.0 { 1.0 + x.ln() } else { 0.0 });
        }

        let weighted: Array1<f64> = tf.iter().zip(&self.idf).map(|(t, w)| t * w).collect();
        match self.norm {
            Norm::L2 => l2_normalize(&weighted),
            Norm::L1 => l1_normalize(&weighted),
            Norm::None => weighted,
        }
    }
}
