//! Term-count and cosine-similarity matrices.
//!
//! - `TermMatrix`: one sparse term-count row per feature bag
//! - `SimilarityMatrix`: dense n x n cosine similarities, row-major `f32`
//!
//! The dense matrix is the dominant memory cost (n² floats), which is why
//! the catalog is capped at load time.

use crate::error::{Result, SimilarityError};
use crate::vocabulary::Vocabulary;
use pipeline::FeatureBag;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Sparse term counts for one bag, sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, u32)>,
}

impl TermVector {
    /// Count the in-vocabulary tokens of a bag
    pub fn encode(vocabulary: &Vocabulary, bag: &FeatureBag) -> Self {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in bag.tokens() {
            if let Some(column) = vocabulary.column(token) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }
        Self {
            entries: counts.into_iter().collect(),
        }
    }

    /// (column, count) pairs in ascending column order
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count for a single column
    pub fn count(&self, column: usize) -> u32 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, c)| (c as f64) * (c as f64))
            .sum::<f64>()
            .sqrt()
    }

    /// Sparse dot product (merge of two sorted lists).
    ///
    /// Products are summed in ascending column order whichever side is
    /// `self`, so `a.dot(b) == b.dot(a)` exactly.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, va) = self.entries[i];
            let (cb, vb) = other.entries[j];
            if ca == cb {
                sum += (va as f64) * (vb as f64);
                i += 1;
                j += 1;
            } else if ca < cb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// Term-by-movie count matrix, one row per bag in corpus order
#[derive(Debug, Clone)]
pub struct TermMatrix {
    rows: Vec<TermVector>,
    columns: usize,
}

impl TermMatrix {
    /// Encode every bag against the vocabulary (in parallel, order kept)
    pub fn encode(vocabulary: &Vocabulary, bags: &[FeatureBag]) -> Self {
        let rows = bags
            .par_iter()
            .map(|bag| TermVector::encode(vocabulary, bag))
            .collect();
        Self {
            rows,
            columns: vocabulary.len(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns
    }

    pub fn row(&self, row: usize) -> Option<&TermVector> {
        self.rows.get(row)
    }
}

/// Square cosine-similarity matrix over catalog rows.
///
/// Invariants: symmetric, diagonal exactly 1.0, entries in [0, 1].
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairwise cosine similarities.
    ///
    /// Rows are filled in parallel. A bag with no tokens has similarity 0.0
    /// to every other row (its diagonal is still 1.0).
    pub fn from_terms(terms: &TermMatrix) -> Result<Self> {
        let n = terms.n_rows();
        let size = n
            .checked_mul(n)
            .ok_or(SimilarityError::MatrixTooLarge { rows: n })?;

        let norms: Vec<f64> = terms.rows.iter().map(TermVector::norm).collect();
        let mut values = vec![0.0f32; size];

        if n > 0 {
            values
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, out)| {
                    let a = &terms.rows[i];
                    for (j, cell) in out.iter_mut().enumerate() {
                        *cell = if i == j {
                            1.0
                        } else {
                            cosine(a, &terms.rows[j], norms[i], norms[j])
                        };
                    }
                });
        }

        Ok(Self { n, values })
    }

    /// Number of rows (== columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between two rows
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// All similarities of one row, indexed by the other row
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}

fn cosine(a: &TermVector, b: &TermVector, norm_a: f64, norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let score = a.dot(b) / (norm_a * norm_b);
    score.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bags(texts: &[&str]) -> Vec<FeatureBag> {
        texts.iter().map(|t| FeatureBag::from(*t)).collect()
    }

    #[test]
    fn test_term_vector_counts() {
        let corpus = bags(&["a b b c"]);
        let vocab = Vocabulary::fit(&corpus);

        let v = TermVector::encode(&vocab, &corpus[0]);

        assert_eq!(v.entries(), &[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(v.count(1), 2);
        assert_eq!(v.count(7), 0);
    }

    #[test]
    fn test_out_of_vocabulary_tokens_ignored() {
        let vocab = Vocabulary::fit(&bags(&["a b"]));

        let v = TermVector::encode(&vocab, &FeatureBag::from("zzz yyy"));
        assert!(v.is_zero());
    }

    #[test]
    fn test_dot_and_norm() {
        let corpus = bags(&["a b b", "b c"]);
        let vocab = Vocabulary::fit(&corpus);
        let m = TermMatrix::encode(&vocab, &corpus);

        let (x, y) = (m.row(0).unwrap(), m.row(1).unwrap());
        assert_eq!(x.dot(y), 2.0);
        assert_eq!(y.dot(x), 2.0);
        assert!((x.norm() - 5.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_values() {
        let corpus = bags(&["a b", "a b", "c d", "a c"]);
        let vocab = Vocabulary::fit(&corpus);
        let sim = SimilarityMatrix::from_terms(&TermMatrix::encode(&vocab, &corpus)).unwrap();

        assert_eq!(sim.len(), 4);
        assert_eq!(sim.get(0, 1), Some(1.0));
        assert_eq!(sim.get(0, 2), Some(0.0));
        assert!((sim.get(0, 3).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(sim.get(4, 0), None);
    }

    #[test]
    fn test_empty_bag_row() {
        let corpus = bags(&["a b", ""]);
        let vocab = Vocabulary::fit(&corpus);
        let sim = SimilarityMatrix::from_terms(&TermMatrix::encode(&vocab, &corpus)).unwrap();

        assert_eq!(sim.get(1, 1), Some(1.0));
        assert_eq!(sim.get(0, 1), Some(0.0));
        assert_eq!(sim.get(1, 0), Some(0.0));
    }
}
