//! Error types for the catalog crate.
//!
//! Two families of failure live here:
//! - reading the prepared dataset (missing file, malformed CSV rows)
//! - querying the loaded catalog (unknown title, row index out of range)

use thiserror::Error;

/// Errors that can occur while loading or querying the movie catalog
///
/// `TitleNotFound` is user-correctable and is expected at the serving
/// boundary. `RowOutOfRange` means some caller mixed up row indices and
/// should never reach a user.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Dataset file could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// A CSV row in the dataset couldn't be decoded
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A record handed to the catalog is not well-formed
    ///
    /// `row` is the position of the record in the input sequence
    #[error("Invalid record at input row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// The title does not match any movie in the catalog
    #[error("Title not found: '{title}'. Please check the spelling or try another movie")]
    TitleNotFound { title: String },

    /// Row index outside of `0..len`
    #[error("Row index {row} out of range for catalog of {len} movies")]
    RowOutOfRange { row: usize, len: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
