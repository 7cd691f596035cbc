use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::artifact_store::ArtifactError;

/// Environment variable overriding the artifact directory.
pub const HOME_ENV: &str = "CAREERLENS_HOME";

/// Where the pre-fitted artifacts and the dataset live, and how to use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub artifact_dir: PathBuf,
    pub vectorizer_file: String,
    pub scaler_file: String,
    pub classifier_file: String,
    pub dataset_file: String,
    pub manifest_file: String,
    /// Overrides the neighbour count stored in the classifier artifact
    pub neighbors: Option<usize>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            artifact_dir: Self::default_artifact_dir(),
            vectorizer_file: "vectorizer.json".into(),
            scaler_file: "scaler.json".into(),
            classifier_file: "knn_model.json".into(),
            dataset_file: "dataset.csv".into(),
            manifest_file: "manifest.json".into(),
            neighbors: None,
        }
    }
}

impl RecommenderConfig {
    /// Config with default file names inside `dir`.
    pub fn with_artifact_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            artifact_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ArtifactError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.neighbors == Some(0) {
            return Err(ArtifactError::Invalid("neighbors must be at least 1".into()));
        }
        for name in [&self.vectorizer_file, &self.scaler_file, &self.classifier_file, &self.dataset_file] {
            if name.trim().is_empty() {
                return Err(ArtifactError::Invalid("artifact file names cannot be empty".into()));
            }
        }
        Ok(())
    }

    /// Returns the default artifact directory path
    pub fn default_artifact_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(HOME_ENV) {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("careerlens");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".local").join("share").join("careerlens");
        }

        // 4. If all else fails, use system temp directory
        env::temp_dir().join("careerlens")
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.vectorizer_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.scaler_file)
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.classifier_file)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.dataset_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.manifest_file)
    }
}
