//! Labeled review datasets and the seeded holdout split.

use crate::error::{Result, SentimentError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Binary review sentiment. Declaration order is the class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 2] = [Sentiment::Negative, Sentiment::Positive];

    /// Class index: Negative = 0, Positive = 1
    pub fn index(self) -> usize {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Parse a dataset label.
    ///
    /// Accepts `1`/`0`, `positive`/`negative`, `pos`/`neg` and `good`/`bad`
    /// in any case.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "1" | "positive" | "pos" | "good" => Some(Sentiment::Positive),
            "0" | "negative" | "neg" | "bad" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Positive => write!(f, "positive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledReview {
    pub text: String,
    pub label: Sentiment,
}

impl LabeledReview {
    pub fn new(text: impl Into<String>, label: Sentiment) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Raw CSV row: `review,sentiment`
#[derive(Debug, Deserialize)]
struct RawReviewRow {
    review: Option<String>,
    sentiment: String,
}

/// Read a `review,sentiment` CSV file.
pub fn read_reviews(path: &Path) -> Result<Vec<LabeledReview>> {
    let file = File::open(path)?;
    let file_name = path.display().to_string();
    let reviews = parse_reviews(file, &file_name)?;
    info!("Loaded {} labeled reviews from {}", reviews.len(), file_name);
    Ok(reviews)
}

/// Parse labeled reviews from any reader. Rows with an empty review text
/// are skipped; an unrecognized label is an error.
pub fn parse_reviews<R: Read>(reader: R, file_name: &str) -> Result<Vec<LabeledReview>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let parse_error = |e: csv::Error| SentimentError::ParseError {
        file: file_name.to_string(),
        line: e.position().map(|p| p.line()).unwrap_or(0),
        reason: e.to_string(),
    };

    let headers = csv_reader.headers().map_err(parse_error)?.clone();
    let mut reviews = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(parse_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: RawReviewRow = record.deserialize(Some(&headers)).map_err(parse_error)?;

        let label = Sentiment::parse_label(&row.sentiment).ok_or_else(|| {
            SentimentError::InvalidLabel {
                line,
                value: row.sentiment.clone(),
            }
        })?;

        if let Some(text) = row.review.filter(|t| !t.trim().is_empty()) {
            reviews.push(LabeledReview::new(text, label));
        }
    }

    Ok(reviews)
}

/// Indices of the training and holdout rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified holdout split with a fixed seed.
///
/// Each class is shuffled on its own and `floor(count * test_fraction)` of
/// its rows are held out, never all of them. Both index lists come back
/// sorted, so the same labels, fraction and seed always give the same split.
pub fn holdout_split(labels: &[Sentiment], test_fraction: f64, seed: u64) -> HoldoutSplit {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for class in Sentiment::ALL {
        let mut rows: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, label)| *label == class)
            .map(|(row, _)| row)
            .collect();
        if rows.is_empty() {
            continue;
        }

        rows.shuffle(&mut rng);
        let held_out = ((rows.len() as f64 * test_fraction).floor() as usize).min(rows.len() - 1);

        test.extend_from_slice(&rows[..held_out]);
        train.extend_from_slice(&rows[held_out..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    HoldoutSplit { train, test }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_variants() {
        for value in ["1", "positive", "POS", " Good "] {
            assert_eq!(Sentiment::parse_label(value), Some(Sentiment::Positive));
        }
        for value in ["0", "Negative", "neg", "bad"] {
            assert_eq!(Sentiment::parse_label(value), Some(Sentiment::Negative));
        }
        assert_eq!(Sentiment::parse_label("meh"), None);
    }

    #[test]
    fn test_parse_reviews() {
        let data = "review,sentiment\n\"Great, fun movie\",1\nboring,0\n,1\n";
        let reviews = parse_reviews(data.as_bytes(), "reviews.csv").unwrap();

        assert_eq!(
            reviews,
            vec![
                LabeledReview::new("Great, fun movie", Sentiment::Positive),
                LabeledReview::new("boring", Sentiment::Negative),
            ]
        );
    }

    #[test]
    fn test_parse_reviews_bad_label() {
        let data = "review,sentiment\nfine,1\nodd,maybe\n";
        let err = parse_reviews(data.as_bytes(), "reviews.csv").unwrap_err();

        assert!(matches!(err, SentimentError::InvalidLabel { ref value, .. } if value == "maybe"));
    }

    #[test]
    fn test_holdout_split_sizes() {
        let mut labels = vec![Sentiment::Positive; 10];
        labels.extend(vec![Sentiment::Negative; 5]);

        let split = holdout_split(&labels, 0.2, 42);

        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 12);
        let held_neg = split
            .test
            .iter()
            .filter(|&&i| labels[i] == Sentiment::Negative)
            .count();
        assert_eq!(held_neg, 1);
    }

    #[test]
    fn test_holdout_split_deterministic() {
        let labels: Vec<Sentiment> = (0..40)
            .map(|i| if i % 3 == 0 { Sentiment::Negative } else { Sentiment::Positive })
            .collect();

        assert_eq!(holdout_split(&labels, 0.2, 42), holdout_split(&labels, 0.2, 42));
    }

    #[test]
    fn test_holdout_keeps_a_training_row_per_class() {
        let labels = vec![Sentiment::Positive, Sentiment::Negative];

        let split = holdout_split(&labels, 0.9, 7);

        assert_eq!(split.train, vec![0, 1]);
        assert!(split.test.is_empty());
    }
}
