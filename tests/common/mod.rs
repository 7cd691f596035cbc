#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use careerlens::{
    ArtifactStore, DistanceMetric, KnnArtifact, RecommenderConfig, TextEncoder,
    TfidfVectorizer,
};
use env_logger::{Builder, Env};
use tempfile::TempDir;

pub const DATASET_CSV: &str = "\
Gender,UG Specialization (Major),Interests,Skills,Average CGPA/Percentage,Certification Courses,Working Status,Mapped Category
0,Computer Science,\"ai, data\",\"python, sql\",3.2,1,1,Data Scientist
0,Computer Science,web,javascript,3.5,1,1,Web Developer
1,Computer Science,\"ai, ml\",python,3.8,1,1,ML Engineer
0,Economics,finance,excel,3.0,0,0,Financial Analyst
0,Computer Science,\"ai, ml\",\"python, sql\",2.5,1,1,Junior Developer
0,Computer Science,\"ml, ai\",\"sql, python\",3.9,1,1,Research Engineer
";

pub const VOCABULARY: [&str; 10] = [
    "ai", "ml", "data", "python", "sql", "computer", "science", "finance", "excel", "economics",
];

// Initialize test logger
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

pub fn vectorizer() -> TfidfVectorizer {
    let vocabulary: HashMap<String, usize> = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, term)| (term.to_string(), i))
        .collect();
    TfidfVectorizer::new(vocabulary, vec![1.0; VOCABULARY.len()]).unwrap()
}

/// A classifier whose two training samples are the encodings of a technical
/// and a finance profile; `extra_features` pads both to a wider width.
pub fn knn_artifact(extra_features: usize) -> KnnArtifact {
    let v = vectorizer();
    let mut tech = v.transform("computer science ai ml python data").to_vec();
    let mut finance = v.transform("economics finance excel").to_vec();
    tech.extend(std::iter::repeat(0.0).take(extra_features));
    finance.extend(std::iter::repeat(0.0).take(extra_features));
    KnnArtifact {
        k: 1,
        metric: DistanceMetric::Euclidean,
        samples: vec![tech, finance],
        labels: vec!["Software & Data".into(), "Finance".into()],
    }
}

pub fn scaler_json(features: usize) -> String {
    let names: Vec<String> = (0..features).map(|i| format!("f{}", i)).collect();
    serde_json::json!({
        "kind": "standard",
        "mean": vec![0.0; features],
        "scale": vec![1.0; features],
        "feature_names_in": names,
    })
    .to_string()
}

pub fn write_artifacts(dir: &Path, extra_features: usize) {
    fs::write(dir.join("vectorizer.json"), serde_json::to_string(&vectorizer()).unwrap()).unwrap();
    fs::write(dir.join("scaler.json"), scaler_json(VOCABULARY.len() + extra_features)).unwrap();
    fs::write(
        dir.join("knn_model.json"),
        serde_json::to_string(&knn_artifact(extra_features)).unwrap(),
    )
    .unwrap();
    fs::write(dir.join("dataset.csv"), DATASET_CSV).unwrap();
}

/// A temp artifact directory where all three artifacts agree in width.
pub fn artifact_dir() -> (TempDir, ArtifactStore) {
    init();
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), 0);
    let store = ArtifactStore::new(RecommenderConfig::with_artifact_dir(dir.path()));
    (dir, store)
}

/// Like [`artifact_dir`] but the scaler and classifier expect one more
/// feature than the vectorizer produces.
pub fn mismatched_artifact_dir() -> (TempDir, ArtifactStore) {
    init();
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), 1);
    let store = ArtifactStore::new(RecommenderConfig::with_artifact_dir(dir.path()));
    (dir, store)
}
