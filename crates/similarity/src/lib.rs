//! # Similarity Crate
//!
//! Content-based similarity over catalog feature bags.
//!
//! ## Components
//!
//! - `Vocabulary`: sorted term list fitted over the whole corpus
//! - `TermMatrix`: sparse term-count vector per bag
//! - `SimilarityMatrix`: dense pairwise cosine similarities
//! - `SimilarityIndex`: owns the above and answers neighbor queries
//!
//! The index is built once and is read-only afterwards, so it can be
//! shared across threads behind an `Arc` without locking.
//!
//! ## Example Usage
//!
//! ```ignore
//! use pipeline::build_bags;
//! use similarity::SimilarityIndex;
//!
//! let bags = build_bags(&catalog);
//! let index = SimilarityIndex::build(&bags)?;
//!
//! let row = catalog.resolve_title("avatar")?;
//! for neighbor in index.neighbors(row, 10)? {
//!     println!("{} {:.3}", catalog.title_at(neighbor.row)?, neighbor.score);
//! }
//! ```

pub mod error;
pub mod vocabulary;
pub mod matrix;
pub mod index;

pub use error::{Result, SimilarityError};
pub use index::{Neighbor, SimilarityIndex};
pub use matrix::{SimilarityMatrix, TermMatrix, TermVector};
pub use vocabulary::Vocabulary;
