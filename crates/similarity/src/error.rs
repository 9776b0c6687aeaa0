//! Error types for the similarity index.

use catalog::RowIndex;
use thiserror::Error;

/// Errors raised while building or querying the similarity index
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimilarityError {
    /// No feature bags were supplied; the matrix would be undefined
    #[error("Cannot build a similarity index from an empty corpus")]
    EmptyCorpus,

    /// Bags were supplied but none of them contains a token
    #[error("Corpus of {bags} feature bags has an empty vocabulary")]
    EmptyVocabulary { bags: usize },

    /// n x n would not fit in memory
    #[error("Similarity matrix for {rows} rows is too large")]
    MatrixTooLarge { rows: usize },

    /// Query for a row the index does not have
    #[error("Row index {row} out of range for index of {len} rows")]
    OutOfRange { row: RowIndex, len: usize },
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
