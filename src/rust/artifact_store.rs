use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::RecommenderConfig;
use crate::dataset::{Dataset, DatasetError};
use crate::recommender::{FeatureScaler, KNearestNeighbors, KnnArtifact, TfidfVectorizer};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed artifact {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact: {0}")]
    Invalid(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

/// Optional `manifest.json`: file name -> hex SHA-256 digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub files: BTreeMap<String, String>,
}

/// Locates, verifies and loads the pre-fitted artifacts described by a
/// [`RecommenderConfig`].
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    config: RecommenderConfig,
}

impl ArtifactStore {
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    /// Creates a store over the default artifact directory
    pub fn new_default() -> Self {
        Self::new(RecommenderConfig::default())
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.config.artifact_dir
    }

    /// Model artifacts that do not exist on disk. The dataset is excluded:
    /// its absence is reported separately and is not fatal.
    pub fn missing_artifacts(&self) -> Vec<PathBuf> {
        let paths = [
            self.config.vectorizer_path(),
            self.config.scaler_path(),
            self.config.classifier_path(),
        ];
        log::info!("Checking artifacts in {:?}", self.config.artifact_dir);
        paths
            .into_iter()
            .filter(|p| {
                let exists = p.exists();
                log::debug!("  {:?} (exists: {})", p, exists);
                !exists
            })
            .collect()
    }

    pub fn is_available(&self) -> bool {
        self.missing_artifacts().is_empty()
    }

    fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, ArtifactError> {
        log::info!("Loading artifact {:?}", path);
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Unreadable { path: path.to_path_buf(), source: e },
        })?;
        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn load_vectorizer(&self) -> Result<TfidfVectorizer, ArtifactError> {
        let vectorizer: TfidfVectorizer = self.load_json(&self.config.vectorizer_path())?;
        vectorizer.validate().map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        log::info!("Vectorizer loaded with {} features", vectorizer.idf.len());
        Ok(vectorizer)
    }

    pub fn load_scaler(&self) -> Result<FeatureScaler, ArtifactError> {
        let scaler: FeatureScaler = self.load_json(&self.config.scaler_path())?;
        scaler.validate().map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        Ok(scaler)
    }

    pub fn load_classifier(&self) -> Result<KNearestNeighbors, ArtifactError> {
        let artifact: KnnArtifact = self.load_json(&self.config.classifier_path())?;
        let mut knn = KNearestNeighbors::from_artifact(artifact)
            .map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        if let Some(k) = self.config.neighbors {
            knn = knn.with_k(k).map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        }
        log::info!("Classifier loaded with {} samples (k = {})", knn.num_samples(), knn.k());
        Ok(knn)
    }

    pub fn load_dataset(&self) -> Result<Dataset, DatasetError> {
        Dataset::load(self.config.dataset_path())
    }

    /// Reads the manifest, if the artifact directory has one.
    pub fn load_manifest(&self) -> Result<Option<ArtifactManifest>, ArtifactError> {
        let path = self.config.manifest_path();
        if !path.exists() {
            return Ok(None);
        }
        self.load_json(&path).map(Some)
    }

    fn file_hash(path: &Path) -> Result<String, ArtifactError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Unreadable { path: path.to_path_buf(), source: e },
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Checks every file listed in the manifest against its digest.
    ///
    /// Returns the number of files verified; zero when there is no manifest.
    pub fn verify(&self) -> Result<usize, ArtifactError> {
        let Some(manifest) = self.load_manifest()? else {
            log::info!("No manifest at {:?}, skipping verification", self.config.manifest_path());
            return Ok(0);
        };

        for (file, expected) in &manifest.files {
            let relative = Path::new(file);
            let escapes = relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes {
                return Err(ArtifactError::Invalid(format!(
                    "manifest entry '{}' must be a path inside the artifact directory",
                    file
                )));
            }
            let path = self.config.artifact_dir.join(relative);
            let actual = Self::file_hash(&path)?;
            log::debug!("{}: expected {}, got {}", file, expected, actual);
            if !actual.eq_ignore_ascii_case(expected) {
                log::error!("{} hash mismatch: expected {}, got {}", file, expected, actual);
                return Err(ArtifactError::HashMismatch {
                    file: file.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        log::info!("Verified {} artifact files", manifest.files.len());
        Ok(manifest.files.len())
    }
}
