//! Catalog building logic.
//!
//! Turns an ordered sequence of records into a `Catalog`:
//! - validate each record (non-blank title and feature fields)
//! - normalize the title into its lookup key
//! - drop duplicate keys (first occurrence wins)
//! - assign row indices in first-seen order

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load a catalog from records, capped at [`DEFAULT_MAX_ROWS`] input rows.
    pub fn load(records: impl IntoIterator<Item = MovieRecord>) -> Result<Self> {
        Self::load_with_limit(records, DEFAULT_MAX_ROWS)
    }

    /// Load a catalog, reading at most `max_rows` input records.
    ///
    /// The cap applies to input rows, before de-duplication, the same way
    /// the prepared CSV is truncated on read.
    ///
    /// Fails on the first malformed record rather than silently skipping it.
    pub fn load_with_limit(
        records: impl IntoIterator<Item = MovieRecord>,
        max_rows: usize,
    ) -> Result<Self> {
        let mut catalog = Catalog::default();

        for (input_row, record) in records.into_iter().take(max_rows).enumerate() {
            validate_record(input_row, &record)?;
            catalog.push(record);
        }

        info!(
            movies = catalog.len(),
            duplicates = catalog.duplicates_dropped,
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Read the prepared dataset CSV and load it
    pub fn load_from_csv(path: &Path, max_rows: usize) -> Result<Self> {
        info!("Loading catalog from {:?}", path);
        let records = parser::read_records(path, max_rows)?;
        Self::load_with_limit(records, max_rows)
    }

    /// Append a validated record unless its key is already present.
    fn push(&mut self, record: MovieRecord) {
        let key = normalize_title(&record.title);
        let row = self.entries.len();

        match self.by_key.entry(key) {
            Entry::Occupied(existing) => {
                debug!(
                    "Dropping duplicate title '{}' (already at row {})",
                    record.title,
                    existing.get()
                );
                self.duplicates_dropped += 1;
            }
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(row);
                self.entries.push(CatalogEntry {
                    display: display_title(&key),
                    key,
                    record,
                });
            }
        }
    }
}

/// Check that a record is well-formed
///
/// The title must survive normalization and every feature field must be
/// non-blank (missing values should already be the "unknown" sentinel).
fn validate_record(input_row: usize, record: &MovieRecord) -> Result<()> {
    if normalize_title(&record.title).is_empty() {
        return Err(CatalogError::InvalidRecord {
            row: input_row,
            reason: format!("title '{}' is empty after normalization", record.title),
        });
    }

    let names = ["actor1", "actor2", "actor3", "director", "genres"];
    for (name, value) in names.iter().zip(record.feature_fields()) {
        if value.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                row: input_row,
                reason: format!("field '{}' is blank, expected '{}'", name, UNKNOWN),
            });
        }
    }
    Ok(())
}
