//! Serving layer for the movie recommender.
//!
//! This crate wires the catalog, similarity index and sentiment classifier
//! into one immutable [`ServiceContext`] and exposes the query interface:
//! - `similar(title)`: up to 10 display titles, or a not-found client error
//! - `classify_review(text)`: `Good` / `Bad`
//! - `titles()` / `search()`: title listing for autocomplete
//!
//! Request payloads are parsed into typed schema structs before they reach
//! the context, and errors are reported as [`ErrorBody`] values.

pub mod config;
pub mod error;
pub mod schema;
pub mod context;
pub mod reviews;

pub use config::ServiceConfig;
pub use context::ServiceContext;
pub use error::{ErrorBody, ErrorKind, QueryError, QueryResult, StartupError};
pub use reviews::{ReviewAnnotator, ReviewSource};
pub use schema::{
    AnnotatedReview, ReviewLabel, ReviewRequest, ReviewResponse, ScoredTitle, SimilarRequest,
    SimilarResponse,
};
