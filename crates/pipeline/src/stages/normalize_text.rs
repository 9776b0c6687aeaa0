//! Stage that pre-normalizes feature text for the similarity index.
//!
//! The index tokenizes on whitespace and is case-sensitive, so "Drama" and
//! "drama," would otherwise be different terms.

use crate::traits::RecordStage;
use anyhow::Result;
use catalog::{normalize_text, MovieRecord, UNKNOWN};
use rayon::prelude::*;

/// Lowercases feature fields, strips punctuation and collapses whitespace.
///
/// Example: "Sci-Fi  Thriller" -> "scifi thriller". A field left empty
/// (e.g. "???") becomes the "unknown" sentinel again.
pub struct NormalizeFeatureText;

impl RecordStage for NormalizeFeatureText {
    fn name(&self) -> &str {
        "NormalizeFeatureText"
    }

    fn apply(&self, records: Vec<MovieRecord>) -> Result<Vec<MovieRecord>> {
        // par_iter on a Vec keeps the original order on collect
        let normalized = records
            .into_par_iter()
            .map(|mut record| {
                for field in record.feature_fields_mut() {
                    let text = normalize_text(field);
                    *field = if text.is_empty() { UNKNOWN.to_string() } else { text };
                }
                record
            })
            .collect();
        Ok(normalized)
    }
}
