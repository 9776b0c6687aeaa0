//! Core domain types for the movie catalog.
//!
//! This module defines the record shape handed over by catalog ingestion
//! and the in-memory `Catalog` that owns those records for the lifetime
//! of the process.
//!
//! Every movie lives at exactly one `RowIndex`. The same index space is
//! used by the similarity matrix, so there is no separate ID layer: the
//! catalog keeps the explicit mapping row -> normalized key -> display title.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CatalogError, Result};

// =============================================================================
// Type Aliases & Constants
// =============================================================================

/// Position of a movie in the catalog (0-based, stable for the process lifetime)
pub type RowIndex = usize;

/// Sentinel substituted for any missing field
pub const UNKNOWN: &str = "unknown";

/// Default cap on catalog rows, bounding the O(n²) similarity matrix
pub const DEFAULT_MAX_ROWS: usize = 5000;

// =============================================================================
// Movie Records
// =============================================================================

/// One movie as supplied by catalog ingestion.
///
/// Missing values are expected to be filled with [`UNKNOWN`] upstream, so
/// every record contributes the same number of fields to its feature text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// Whitespace-separated genre tokens, e.g. "Action Sci-Fi"
    pub genres: String,
    pub director: String,
    pub actor1: String,
    pub actor2: String,
    pub actor3: String,
}

impl MovieRecord {
    pub fn new(
        title: impl Into<String>,
        genres: impl Into<String>,
        director: impl Into<String>,
        actor1: impl Into<String>,
        actor2: impl Into<String>,
        actor3: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genres: genres.into(),
            director: director.into(),
            actor1: actor1.into(),
            actor2: actor2.into(),
            actor3: actor3.into(),
        }
    }

    /// Feature fields in bag order: actors, director, genres
    pub fn feature_fields(&self) -> [&str; 5] {
        [
            &self.actor1,
            &self.actor2,
            &self.actor3,
            &self.director,
            &self.genres,
        ]
    }

    /// Mutable access to the feature fields, same order as [`feature_fields`](Self::feature_fields)
    pub fn feature_fields_mut(&mut self) -> [&mut String; 5] {
        [
            &mut self.actor1,
            &mut self.actor2,
            &mut self.actor3,
            &mut self.director,
            &mut self.genres,
        ]
    }
}

// =============================================================================
// Title Normalization
// =============================================================================

/// Drop punctuation (anything that is not a word character or whitespace),
/// collapse whitespace runs to single spaces and lowercase.
///
/// Shared by title keys and the feature text fed to the similarity index.
///
/// Example: "Sci-Fi  Thriller" -> "scifi thriller"
pub fn normalize_text(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalize a title into its lookup key.
///
/// Example: "  The Matrix: Reloaded " -> "the matrix reloaded"
pub fn normalize_title(raw: &str) -> String {
    normalize_text(raw)
}

/// Display form of a normalized key: first character uppercased, rest unchanged.
///
/// The key is returned as is when the capitalized form would not normalize
/// back to it ("ßig" would become "SSig"), so every display title resolves
/// to its own row.
///
/// Example: "the matrix" -> "The matrix"
pub fn display_title(key: &str) -> String {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let capitalized: String = first.to_uppercase().chain(chars).collect();
    if normalize_title(&capitalized) == key {
        capitalized
    } else {
        key.to_string()
    }
}

// =============================================================================
// Catalog - The In-Memory Movie Table
// =============================================================================

/// One catalog row.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Normalized lookup key (see [`normalize_title`])
    pub key: String,
    /// Capitalized form shown to users
    pub display: String,
    pub record: MovieRecord,
}

/// The loaded movie table.
///
/// Built once via [`Catalog::load`] and read-only afterwards, so it can be
/// shared across threads behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Rows in first-seen order; position == `RowIndex`
    pub(crate) entries: Vec<CatalogEntry>,
    /// Normalized key -> row
    pub(crate) by_key: HashMap<String, RowIndex>,
    /// Records dropped because their normalized title was already present
    pub(crate) duplicates_dropped: usize,
}

impl Catalog {
    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many input records were discarded as duplicate titles
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    /// Resolve a user-supplied title to its row.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace and
    /// punctuation, so "The Matrix", "the matrix" and " The Matrix " all
    /// land on the same row.
    pub fn resolve_title(&self, raw_title: &str) -> Result<RowIndex> {
        let key = normalize_title(raw_title);
        self.by_key
            .get(&key)
            .copied()
            .ok_or_else(|| CatalogError::TitleNotFound {
                title: raw_title.trim().to_string(),
            })
    }

    /// Get the full entry for a row
    pub fn entry(&self, row: RowIndex) -> Result<&CatalogEntry> {
        self.entries.get(row).ok_or(CatalogError::RowOutOfRange {
            row,
            len: self.entries.len(),
        })
    }

    /// Display title of a row
    pub fn title_at(&self, row: RowIndex) -> Result<&str> {
        self.entry(row).map(|e| e.display.as_str())
    }

    /// Normalized key of a row
    pub fn key_at(&self, row: RowIndex) -> Result<&str> {
        self.entry(row).map(|e| e.key.as_str())
    }

    /// Source record of a row
    pub fn record_at(&self, row: RowIndex) -> Result<&MovieRecord> {
        self.entry(row).map(|e| &e.record)
    }

    /// All display titles in row order
    pub fn all_titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.display.as_str()).collect()
    }

    /// Iterate over the records in row order
    pub fn records(&self) -> impl Iterator<Item = &MovieRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Case-insensitive substring search over titles, in row order.
    ///
    /// Backs title autocomplete. An empty fragment matches nothing.
    pub fn search(&self, fragment: &str, limit: usize) -> Vec<RowIndex> {
        let needle = normalize_title(fragment);
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.key.contains(&needle))
            .map(|(row, _)| row)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("The Matrix"), "the matrix");
        assert_eq!(normalize_title("  The   Matrix "), "the matrix");
        assert_eq!(normalize_title("Mission: Impossible"), "mission impossible");
        assert_eq!(normalize_title("WALL·E"), "walle");
        assert_eq!(normalize_title("?!"), "");
    }

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("the matrix"), "The matrix");
        assert_eq!(display_title("2012"), "2012");
        assert_eq!(display_title(""), "");
        assert_eq!(display_title("élan"), "Élan");
    }

    #[test]
    fn test_display_title_keeps_unstable_capitals() {
        // Uppercasing these changes the character count, lowercasing does not undo it
        assert_eq!(display_title("ßig"), "ßig");
        assert_eq!(display_title("ﬁlm noir"), "ﬁlm noir");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Sci-Fi  Thriller"), "scifi thriller");
        assert_eq!(normalize_text(" Guillermo del Toro "), "guillermo del toro");
        assert_eq!(normalize_text("unknown"), "unknown");
    }

    #[test]
    fn test_feature_fields_order() {
        let record = MovieRecord::new("Up", "Animation", "Pete Docter", "a", "b", "c");
        assert_eq!(
            record.feature_fields(),
            ["a", "b", "c", "Pete Docter", "Animation"]
        );
    }
}
