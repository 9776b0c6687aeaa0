//! Error types for training, persisting and loading the classifier.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the sentiment crate.
///
/// Classification itself has no error path: any string can be scored.
#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Training dataset is empty")]
    EmptyDataset,

    /// Binary classifier needs exactly two distinct labels
    #[error("Expected exactly 2 sentiment classes, found {found}")]
    ClassCount { found: usize },

    /// Every review reduced to stop words or single characters
    #[error("Review texts produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("Invalid sentiment label '{value}' at line {line}")]
    InvalidLabel { line: u64, value: String },

    #[error("Invalid training config: {0}")]
    InvalidConfig(String),

    #[error("Parse error in {file} at line {line}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("Artifact serialization failed: {0}")]
    Serialization(String),

    /// Vectorizer and model were fitted on different vocabularies
    #[error("Vectorizer has {vocabulary} terms but model expects {features} features")]
    ArtifactMismatch { vocabulary: usize, features: usize },

    /// Blob decoded but its tables disagree with each other
    #[error("Artifact is internally inconsistent: {0}")]
    CorruptArtifact(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SentimentError>;
