//! TF-IDF vectorizer over review texts.
//!
//! ```text
//! tfidf(t, d) = count(t, d) * idf(t)
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! Each document vector is then L2-normalized.

use crate::error::{Result, SentimentError};
use crate::text::{tokenize, ENGLISH_STOP_WORDS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sparse document vector: (term index, weight) sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// All-zero vector (no known term in the text)
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// Fitted TF-IDF vectorizer.
///
/// The vocabulary is a `BTreeMap` so serialized bytes depend only on the
/// fitted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    stop_words: BTreeSet<String>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and document frequencies with English stop words removed.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        let stop_words = ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect();
        Self::fit_with_stop_words(documents, stop_words)
    }

    pub fn fit_with_stop_words<S: AsRef<str>>(
        documents: &[S],
        stop_words: BTreeSet<String>,
    ) -> Result<Self> {
        if documents.is_empty() {
            return Err(SentimentError::EmptyDataset);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let unique: BTreeSet<String> = tokenize(document.as_ref())
                .into_iter()
                .filter(|token| !stop_words.contains(token))
                .collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(SentimentError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            vocabulary,
            idf,
            stop_words,
        })
    }

    /// Vectorize one text. Unknown and stop-word tokens are ignored, so this
    /// never fails; a text with no known term yields the zero vector.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in tokenize(text) {
            if self.stop_words.contains(&token) {
                continue;
            }
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count as f64 * self.idf[index]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        FeatureVector { entries }
    }

    /// Check that every vocabulary entry has an idf weight.
    ///
    /// A fitted vectorizer always passes; a decoded one may not.
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(SentimentError::CorruptArtifact(format!(
                "{} vocabulary terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        let out_of_range = self.vocabulary.iter().find(|&(_, &i)| i >= self.idf.len());
        if let Some((term, &index)) = out_of_range {
            return Err(SentimentError::CorruptArtifact(format!(
                "term '{}' maps to column {} of {}",
                term,
                index,
                self.idf.len()
            )));
        }
        Ok(())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }
}
