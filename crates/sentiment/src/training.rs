//! Offline training: vectorize, split, fit, evaluate.

use crate::artifact::ClassifierArtifact;
use crate::dataset::{holdout_split, LabeledReview, Sentiment};
use crate::error::{Result, SentimentError};
use crate::naive_bayes::MultinomialNb;
use crate::tfidf::{FeatureVector, TfidfVectorizer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Share of each class held out for accuracy reporting, in `[0, 1)`
    pub test_fraction: f64,
    pub seed: u64,
    /// Laplace smoothing
    pub alpha: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            alpha: 1.0,
        }
    }
}

impl TrainingConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(SentimentError::InvalidConfig(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        if !(self.alpha > 0.0) {
            return Err(SentimentError::InvalidConfig(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    /// Holdout accuracy, `None` when nothing was held out
    pub accuracy: Option<f64>,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train={} test={} vocabulary={} accuracy=",
            self.train_size, self.test_size, self.vocabulary_size
        )?;
        match self.accuracy {
            Some(acc) => write!(f, "{:.2}%", acc * 100.0),
            None => write!(f, "n/a"),
        }
    }
}

/// Train a classifier artifact from labeled reviews.
///
/// The vectorizer is fitted on every review text; the model only sees the
/// training split. Fails if the dataset is empty or does not contain
/// exactly two labels.
#[instrument(skip(reviews), fields(reviews = reviews.len()))]
pub fn train(
    reviews: &[LabeledReview],
    config: &TrainingConfig,
) -> Result<(ClassifierArtifact, TrainingReport)> {
    config.validate()?;
    if reviews.is_empty() {
        return Err(SentimentError::EmptyDataset);
    }

    let classes: BTreeSet<Sentiment> = reviews.iter().map(|r| r.label).collect();
    if classes.len() != 2 {
        return Err(SentimentError::ClassCount {
            found: classes.len(),
        });
    }

    let start = Instant::now();

    let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
    let labels: Vec<Sentiment> = reviews.iter().map(|r| r.label).collect();

    let vectorizer = TfidfVectorizer::fit(&texts)?;
    let features: Vec<FeatureVector> = texts.iter().map(|t| vectorizer.transform(t)).collect();

    let split = holdout_split(&labels, config.test_fraction, config.seed);
    let train_x: Vec<FeatureVector> = split.train.iter().map(|&i| features[i].clone()).collect();
    let train_y: Vec<Sentiment> = split.train.iter().map(|&i| labels[i]).collect();

    let model = MultinomialNb::fit(&train_x, &train_y, vectorizer.vocabulary_size(), config.alpha)?;

    let accuracy = if split.test.is_empty() {
        None
    } else {
        let correct = split
            .test
            .iter()
            .filter(|&&i| model.predict(&features[i]) == labels[i])
            .count();
        Some(correct as f64 / split.test.len() as f64)
    };

    let report = TrainingReport {
        train_size: split.train.len(),
        test_size: split.test.len(),
        vocabulary_size: vectorizer.vocabulary_size(),
        accuracy,
    };
    info!("Trained sentiment classifier in {:?}: {}", start.elapsed(), report);

    let artifact = ClassifierArtifact::new(vectorizer, model)?;
    Ok((artifact, report))
}
