//! # Catalog Crate
//!
//! This crate owns the movie table behind title lookup and the row-index
//! space shared with the similarity index.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord`, `Catalog`, title normalization
//! - **parser**: read the prepared dataset CSV into records
//! - **index**: build a `Catalog` (validation, de-duplication, row assignment)
//! - **error**: error types for loading and lookup
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, DEFAULT_MAX_ROWS};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_csv(Path::new("data/final_data.csv"), DEFAULT_MAX_ROWS)?;
//!
//! let row = catalog.resolve_title(" the matrix ")?;
//! println!("{} is row {}", catalog.title_at(row)?, row);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    display_title,
    normalize_text,
    normalize_title,
    Catalog,
    CatalogEntry,
    MovieRecord,
    RowIndex,
    DEFAULT_MAX_ROWS,
    UNKNOWN,
};
