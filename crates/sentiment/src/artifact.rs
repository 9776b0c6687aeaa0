//! Persisted classifier: fitted vectorizer + fitted model.
//!
//! Stored as two bincode blobs in one directory:
//! - `transform.bin`: the TF-IDF vectorizer
//! - `sentiment_model.bin`: the Naive Bayes model

use crate::dataset::Sentiment;
use crate::error::{Result, SentimentError};
use crate::naive_bayes::MultinomialNb;
use crate::tfidf::TfidfVectorizer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

pub const VECTORIZER_FILE: &str = "transform.bin";
pub const MODEL_FILE: &str = "sentiment_model.bin";

/// Immutable (vectorizer, model) pair used at serving time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierArtifact {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl ClassifierArtifact {
    /// Pair a vectorizer with a model fitted on its output.
    ///
    /// Rejects pairs whose tables disagree, so a loaded artifact can
    /// classify any text without bounds failures.
    pub fn new(vectorizer: TfidfVectorizer, model: MultinomialNb) -> Result<Self> {
        vectorizer.validate()?;
        model.validate()?;
        if vectorizer.vocabulary_size() != model.n_features() {
            return Err(SentimentError::ArtifactMismatch {
                vocabulary: vectorizer.vocabulary_size(),
                features: model.n_features(),
            });
        }
        Ok(Self { vectorizer, model })
    }

    /// Label any text. Deterministic and total: unseen words are ignored.
    pub fn classify(&self, text: &str) -> Sentiment {
        self.model.predict(&self.vectorizer.transform(text))
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &MultinomialNb {
        &self.model
    }

    pub fn vectorizer_bytes(&self) -> Result<Vec<u8>> {
        encode(&self.vectorizer)
    }

    pub fn model_bytes(&self) -> Result<Vec<u8>> {
        encode(&self.model)
    }

    pub fn from_bytes(vectorizer: &[u8], model: &[u8]) -> Result<Self> {
        Self::new(decode(vectorizer)?, decode(model)?)
    }

    /// Write both blobs into `dir`, creating it if needed.
    pub fn save_to_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(VECTORIZER_FILE), self.vectorizer_bytes()?)?;
        fs::write(dir.join(MODEL_FILE), self.model_bytes()?)?;

        info!("Saved classifier artifact to {}", dir.display());
        Ok(())
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let vectorizer = read_blob(&dir.join(VECTORIZER_FILE))?;
        let model = read_blob(&dir.join(MODEL_FILE))?;
        let artifact = Self::from_bytes(&vectorizer, &model)?;

        info!(
            "Loaded classifier artifact from {} ({} terms)",
            dir.display(),
            artifact.vectorizer.vocabulary_size()
        );
        Ok(artifact)
    }
}

fn read_blob(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(SentimentError::ArtifactNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read(path)?)
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| SentimentError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| SentimentError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::FeatureVector;
    use std::collections::{BTreeMap, BTreeSet};

    /// Field layout of a serialized `TfidfVectorizer`
    type VectorizerFields = (BTreeMap<String, usize>, Vec<f64>, BTreeSet<String>);

    fn artifact() -> ClassifierArtifact {
        let texts = ["lovely warm story", "dull messy story"];
        let vectorizer = TfidfVectorizer::fit(&texts).unwrap();
        let features: Vec<FeatureVector> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let model = MultinomialNb::fit(
            &features,
            &[Sentiment::Positive, Sentiment::Negative],
            vectorizer.vocabulary_size(),
            1.0,
        )
        .unwrap();
        ClassifierArtifact::new(vectorizer, model).unwrap()
    }

    #[test]
    fn test_bytes_round_trip_identical() {
        let original = artifact();
        let (v, m) = (original.vectorizer_bytes().unwrap(), original.model_bytes().unwrap());

        let restored = ClassifierArtifact::from_bytes(&v, &m).unwrap();

        assert_eq!(restored, original);
        assert_eq!(restored.vectorizer_bytes().unwrap(), v);
        assert_eq!(restored.model_bytes().unwrap(), m);
    }

    #[test]
    fn test_save_and_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let original = artifact();

        original.save_to_dir(dir.path()).unwrap();
        assert!(dir.path().join(VECTORIZER_FILE).exists());
        assert!(dir.path().join(MODEL_FILE).exists());

        let loaded = ClassifierArtifact::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.classify("lovely"), Sentiment::Positive);
        assert_eq!(loaded.classify("dull"), Sentiment::Negative);
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempfile::tempdir().unwrap();

        let err = ClassifierArtifact::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SentimentError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_corrupt_blob() {
        let good = artifact();
        let err =
            ClassifierArtifact::from_bytes(&[1, 2, 3], &good.model_bytes().unwrap()).unwrap_err();
        assert!(matches!(err, SentimentError::Serialization(_)));
    }

    #[test]
    fn test_mismatched_pair_rejected() {
        let a = artifact();
        let other = TfidfVectorizer::fit(&["completely different words here"]).unwrap();

        let err = ClassifierArtifact::new(other, a.model().clone()).unwrap_err();
        assert!(matches!(err, SentimentError::ArtifactMismatch { .. }));
    }

    #[test]
    fn test_truncated_idf_blob_rejected() {
        let good = artifact();
        let (vocabulary, mut idf, stop_words): VectorizerFields =
            bincode::deserialize(&good.vectorizer_bytes().unwrap()).unwrap();
        idf.truncate(1);
        let blob = bincode::serialize(&(vocabulary, idf, stop_words)).unwrap();

        let err = ClassifierArtifact::from_bytes(&blob, &good.model_bytes().unwrap()).unwrap_err();
        assert!(matches!(err, SentimentError::CorruptArtifact(_)));
    }

    #[test]
    fn test_classify_is_total() {
        let a = artifact();
        for text in ["", "   ", "?!", "ünïcödé 映画", "story"] {
            let _ = a.classify(text);
        }
        assert_eq!(a.classify(""), a.classify(""));
    }
}
