mod builder;
mod encoder;
mod error;
mod knn;
mod predict;
mod ranking;
mod recommender;
mod scaler;
pub(crate) mod utils;

pub use builder::RecommenderBuilder;
pub use encoder::{Norm, TextEncoder, TfidfVectorizer};
pub use error::RecommendError;
pub use knn::{DistanceMetric, KNearestNeighbors, KnnArtifact, LabelClassifier};
pub use predict::{CareerPredictor, Prediction};
pub use ranking::{filter_and_rank, matches_profile, overlap_count, RankedJob};
pub use recommender::{Recommendation, Recommender, RecommenderInfo, NO_MATCH_MESSAGE};
pub use scaler::{FeatureScaler, Normalizer};
