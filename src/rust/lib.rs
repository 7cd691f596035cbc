//! Job recommendations from a user profile.
//!
//! A [`Recommender`] combines two independent answers to one form submission:
//!
//! * **Filter and rank** – dataset rows whose gender, major, certification and
//!   working status equal the profile's and whose CGPA is at least the
//!   profile's threshold, ranked by how many interest and skill tags they
//!   share with the profile.
//! * **Predict** – the profile's free text is encoded with a pre-fitted
//!   TF-IDF vectorizer, normalised with a pre-fitted scaler and labelled by a
//!   k-nearest-neighbour classifier.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use careerlens::{ArtifactStore, Certification, Gender, Profile, Recommender,
//!                  RecommenderConfig, WorkingStatus};
//!
//! let store = ArtifactStore::new(RecommenderConfig::with_artifact_dir("models"));
//! let recommender = Recommender::builder()
//!     .with_artifacts(&store)?
//!     .with_dataset(store.load_dataset()?)
//!     .build()?;
//!
//! let profile = Profile::new(Gender::Male, "Computer Science")
//!     .with_interests("ai, ml")
//!     .with_skills("python")
//!     .with_min_cgpa(3.0)
//!     .with_certification(Certification::Yes, "Data Science Certification")
//!     .with_working_status(WorkingStatus::Working);
//!
//! let recommendation = recommender.recommend(&profile)?;
//! println!("{}", recommendation.prediction);
//! for category in recommendation.categories() {
//!     println!("{}", category);
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifact_store;
pub mod config;
pub mod dataset;
pub mod profile;
pub mod recommender;

pub use artifact_store::{ArtifactError, ArtifactManifest, ArtifactStore};
pub use config::RecommenderConfig;
pub use dataset::{Dataset, DatasetError, JobRecord};
pub use profile::{Certification, Gender, Profile, WorkingStatus, MAX_CGPA, MIN_CGPA};
pub use recommender::{
    CareerPredictor, DistanceMetric, FeatureScaler, KNearestNeighbors, KnnArtifact,
    LabelClassifier, Normalizer, Prediction, RankedJob, RecommendError, Recommendation,
    Recommender, RecommenderBuilder, RecommenderInfo, TextEncoder, TfidfVectorizer,
};

pub fn init_logger() {
    env_logger::init();
}
