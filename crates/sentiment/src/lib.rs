//! Review sentiment classifier.
//!
//! Trained offline, loaded read-only at serving time:
//! - `text`: lowercasing, ASCII accent stripping, tokenizing, stop words
//! - `tfidf`: `TfidfVectorizer` producing L2-normalized sparse vectors
//! - `naive_bayes`: two-class `MultinomialNb`
//! - `training`: `train` with a seeded stratified holdout
//! - `artifact`: `ClassifierArtifact` and its on-disk blobs
//!
//! ## Example Usage
//! ```ignore
//! use sentiment::{read_reviews, train, ClassifierArtifact, TrainingConfig};
//!
//! let reviews = read_reviews(Path::new("reviews.csv"))?;
//! let (artifact, report) = train(&reviews, &TrainingConfig::default())?;
//! artifact.save_to_dir(Path::new("artifacts"))?;
//!
//! let artifact = ClassifierArtifact::load_from_dir(Path::new("artifacts"))?;
//! println!("{}", artifact.classify("An excellent film"));
//! ```

pub mod error;
pub mod text;
pub mod tfidf;
pub mod naive_bayes;
pub mod dataset;
pub mod training;
pub mod artifact;

pub use artifact::{ClassifierArtifact, MODEL_FILE, VECTORIZER_FILE};
pub use dataset::{holdout_split, parse_reviews, read_reviews, HoldoutSplit, LabeledReview, Sentiment};
pub use error::{Result, SentimentError};
pub use naive_bayes::MultinomialNb;
pub use tfidf::{FeatureVector, TfidfVectorizer};
pub use training::{train, TrainingConfig, TrainingReport};
