//! Query and startup errors.
//!
//! Query errors are split into client faults (unknown title, malformed
//! request) and server faults. Server faults carry detail for the log only;
//! their [`ErrorBody`] holds a generic message.

use catalog::CatalogError;
use sentiment::SentimentError;
use serde::{Deserialize, Serialize};
use similarity::SimilarityError;
use thiserror::Error;

pub const TITLE_NOT_FOUND_MESSAGE: &str = "Oops! The movie you requested is not in our records. \
     Please make sure the spelling is correct or try with some other movies";

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{}", TITLE_NOT_FOUND_MESSAGE)]
    TitleNotFound { title: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Client,
    Server,
}

/// Error payload returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::TitleNotFound { .. } | QueryError::InvalidRequest(_) => ErrorKind::Client,
            QueryError::Internal(_) => ErrorKind::Server,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let error = match self {
            QueryError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        };
        ErrorBody {
            error,
            kind: self.kind(),
        }
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Fatal errors while building the service; the service must not start.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Record preparation failed: {0:#}")]
    Preparation(#[from] anyhow::Error),

    #[error("Failed to build similarity index: {0}")]
    Index(#[from] SimilarityError),

    #[error("Failed to load sentiment classifier: {0}")]
    Classifier(#[from] SentimentError),
}
