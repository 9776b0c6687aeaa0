//! Similarity index: vocabulary + cosine matrix + nearest-neighbor queries.

use crate::error::{Result, SimilarityError};
use crate::matrix::{SimilarityMatrix, TermMatrix};
use crate::vocabulary::Vocabulary;
use catalog::RowIndex;
use pipeline::FeatureBag;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// One neighbor of a query row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: RowIndex,
    pub score: f32,
}

impl Neighbor {
    pub fn new(row: RowIndex, score: f32) -> Self {
        Self { row, score }
    }

    /// Descending score, then ascending row
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.row.cmp(&other.row))
    }
}

/// Immutable index built once from every catalog bag.
///
/// Row `i` of the index is row `i` of the catalog the bags came from.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    vocabulary: Vocabulary,
    matrix: SimilarityMatrix,
}

impl SimilarityIndex {
    /// Fit the vocabulary, encode all bags and compute the full matrix.
    ///
    /// # Errors
    /// - `EmptyCorpus` when `bags` is empty
    /// - `EmptyVocabulary` when no bag contains a token
    #[instrument(skip(bags), fields(bags = bags.len()))]
    pub fn build(bags: &[FeatureBag]) -> Result<Self> {
        if bags.is_empty() {
            return Err(SimilarityError::EmptyCorpus);
        }

        let start = Instant::now();

        let vocabulary = Vocabulary::fit(bags);
        if vocabulary.is_empty() {
            return Err(SimilarityError::EmptyVocabulary { bags: bags.len() });
        }
        debug!("Fitted vocabulary of {} terms", vocabulary.len());

        let terms = TermMatrix::encode(&vocabulary, bags);
        let matrix = SimilarityMatrix::from_terms(&terms)?;

        info!(
            "Built similarity index: {} rows, {} terms in {:?}",
            matrix.len(),
            vocabulary.len(),
            start.elapsed()
        );

        Ok(Self { vocabulary, matrix })
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Cosine similarity between two rows
    pub fn similarity(&self, a: RowIndex, b: RowIndex) -> Result<f32> {
        let len = self.len();
        let bad = if a >= len { a } else { b };
        self.matrix
            .get(a, b)
            .ok_or(SimilarityError::OutOfRange { row: bad, len })
    }

    /// The `k` rows most similar to `row`, excluding `row` itself.
    ///
    /// Ordered by descending score, ties by ascending row index. `k` is
    /// clamped to `n - 1`; `k == 0` yields an empty list.
    #[instrument(skip(self))]
    pub fn neighbors(&self, row: RowIndex, k: usize) -> Result<Vec<Neighbor>> {
        let scores = self.matrix.row(row).ok_or(SimilarityError::OutOfRange {
            row,
            len: self.len(),
        })?;

        let k = k.min(self.len().saturating_sub(1));
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<Neighbor> = scores
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .map(|(other, &score)| Neighbor::new(other, score))
            .collect();

        // Partial selection first; only the top k need a full sort
        if k < candidates.len() {
            candidates.select_nth_unstable_by(k - 1, Neighbor::rank_cmp);
            candidates.truncate(k);
        }
        candidates.sort_by(Neighbor::rank_cmp);

        debug!(
            "Row {} top neighbor: {:?}",
            row,
            candidates.first().map(|n| n.row)
        );

        Ok(candidates)
    }
}
