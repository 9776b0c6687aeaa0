//! Multinomial Naive Bayes over TF-IDF feature vectors.

use crate::dataset::Sentiment;
use crate::error::{Result, SentimentError};
use crate::tfidf::FeatureVector;
use serde::{Deserialize, Serialize};

/// Two-class multinomial NB with additive (Laplace) smoothing.
///
/// Arrays are indexed by `Sentiment::index()`: `[Negative, Positive]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNb {
    /// Fit on feature vectors with `n_features` columns.
    ///
    /// Both classes must be present in `labels`.
    pub fn fit(
        features: &[FeatureVector],
        labels: &[Sentiment],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if features.is_empty() {
            return Err(SentimentError::EmptyDataset);
        }
        if features.len() != labels.len() {
            return Err(SentimentError::InvalidConfig(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if !(alpha > 0.0) {
            return Err(SentimentError::InvalidConfig(format!(
                "alpha must be positive, got {alpha}"
            )));
        }

        let mut class_count = [0usize; 2];
        let mut feature_count = [vec![0.0f64; n_features], vec![0.0f64; n_features]];

        for (row, (x, label)) in features.iter().zip(labels).enumerate() {
            let class = label.index();
            class_count[class] += 1;
            for &(column, weight) in x.entries() {
                let Some(count) = feature_count[class].get_mut(column) else {
                    return Err(SentimentError::InvalidConfig(format!(
                        "feature vector {row} has column {column}, expected fewer than {n_features}"
                    )));
                };
                *count += weight;
            }
        }

        let found = class_count.iter().filter(|&&c| c > 0).count();
        if found != 2 {
            return Err(SentimentError::ClassCount { found });
        }

        let total = features.len() as f64;
        let class_log_prior = class_count.map(|c| (c as f64 / total).ln());
        let feature_log_prob = feature_count.map(|counts| {
            let smoothed_total: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
            counts
                .into_iter()
                .map(|c| (c + alpha).ln() - smoothed_total.ln())
                .collect()
        });

        Ok(Self {
            alpha,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Check that both classes score the same feature columns.
    pub fn validate(&self) -> Result<()> {
        let [negative, positive] = &self.feature_log_prob;
        if negative.len() != positive.len() {
            return Err(SentimentError::CorruptArtifact(format!(
                "class feature tables have {} and {} columns",
                negative.len(),
                positive.len()
            )));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unnormalized log posterior per class, `[Negative, Positive]`.
    ///
    /// Columns beyond `n_features` contribute nothing.
    pub fn joint_log_likelihood(&self, x: &FeatureVector) -> [f64; 2] {
        let mut scores = self.class_log_prior;
        for (class, score) in scores.iter_mut().enumerate() {
            let log_prob = &self.feature_log_prob[class];
            for &(column, weight) in x.entries() {
                if let Some(lp) = log_prob.get(column) {
                    *score += weight * lp;
                }
            }
        }
        scores
    }

    /// Most likely class; an exact tie goes to `Negative`.
    pub fn predict(&self, x: &FeatureVector) -> Sentiment {
        let [negative, positive] = self.joint_log_likelihood(x);
        if positive > negative {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::TfidfVectorizer;

    fn fitted() -> (TfidfVectorizer, MultinomialNb) {
        let texts = ["good great fun", "great good", "bad awful", "awful boring bad"];
        let labels = [
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Negative,
        ];
        let vectorizer = TfidfVectorizer::fit(&texts).unwrap();
        let features: Vec<_> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let model =
            MultinomialNb::fit(&features, &labels, vectorizer.vocabulary_size(), 1.0).unwrap();
        (vectorizer, model)
    }

    #[test]
    fn test_predict_known_words() {
        let (vectorizer, model) = fitted();

        assert_eq!(model.predict(&vectorizer.transform("great fun")), Sentiment::Positive);
        assert_eq!(model.predict(&vectorizer.transform("boring")), Sentiment::Negative);
    }

    #[test]
    fn test_zero_vector_tie_is_negative() {
        let (_, model) = fitted();

        // Balanced priors, no features: exact tie
        assert_eq!(model.predict(&FeatureVector::default()), Sentiment::Negative);
    }

    #[test]
    fn test_log_probs_are_distributions() {
        let (_, model) = fitted();

        for class in 0..2 {
            let total: f64 = model.feature_log_prob[class].iter().map(|lp| lp.exp()).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_class_rejected() {
        let vectorizer = TfidfVectorizer::fit(&["good", "great"]).unwrap();
        let features: Vec<_> = ["good", "great"].iter().map(|t| vectorizer.transform(t)).collect();

        let err = MultinomialNb::fit(
            &features,
            &[Sentiment::Positive, Sentiment::Positive],
            vectorizer.vocabulary_size(),
            1.0,
        )
        .unwrap_err();

        assert!(matches!(err, SentimentError::ClassCount { found: 1 }));
    }

    #[test]
    fn test_column_beyond_n_features_rejected() {
        let vectorizer = TfidfVectorizer::fit(&["good great", "bad awful"]).unwrap();
        let features: Vec<_> = ["good great", "bad awful"]
            .iter()
            .map(|t| vectorizer.transform(t))
            .collect();

        let err = MultinomialNb::fit(&features, &[Sentiment::Positive, Sentiment::Negative], 1, 1.0)
            .unwrap_err();

        assert!(matches!(err, SentimentError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_uneven_class_tables() {
        let (_, mut model) = fitted();
        assert!(model.validate().is_ok());

        model.feature_log_prob[1].pop();
        assert!(matches!(model.validate(), Err(SentimentError::CorruptArtifact(_))));
    }

    #[test]
    fn test_invalid_alpha() {
        let features = vec![FeatureVector::default(); 2];
        let labels = [Sentiment::Positive, Sentiment::Negative];

        assert!(matches!(
            MultinomialNb::fit(&features, &labels, 1, 0.0),
            Err(SentimentError::InvalidConfig(_))
        ));
    }
}
