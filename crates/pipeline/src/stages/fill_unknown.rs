//! Stage that substitutes the "unknown" sentinel for missing values.
//!
//! Ingestion is supposed to do this already; running it again is cheap and
//! keeps records from other collaborators uniform.

use crate::traits::RecordStage;
use anyhow::Result;
use catalog::{MovieRecord, UNKNOWN};

/// Replaces blank or whitespace-only feature fields with [`UNKNOWN`].
///
/// The title is left alone: a record without a title is dropped later by
/// `RequireTitle`, not papered over.
pub struct FillUnknown;

impl RecordStage for FillUnknown {
    fn name(&self) -> &str {
        "FillUnknown"
    }

    fn apply(&self, records: Vec<MovieRecord>) -> Result<Vec<MovieRecord>> {
        let filled = records
            .into_iter()
            .map(|mut record| {
                for field in record.feature_fields_mut() {
                    if field.trim().is_empty() {
                        *field = UNKNOWN.to_string();
                    }
                }
                record
            })
            .collect();
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_unknown() {
        let records = vec![MovieRecord::new("Brave", "Animation", "", "  ", "", "Kelly Macdonald")];

        let out = FillUnknown.apply(records).unwrap();

        assert_eq!(out[0].title, "Brave");
        assert_eq!(out[0].genres, "Animation");
        assert_eq!(out[0].director, UNKNOWN);
        assert_eq!(out[0].actor1, UNKNOWN);
        assert_eq!(out[0].actor2, UNKNOWN);
        assert_eq!(out[0].actor3, "Kelly Macdonald");
    }
}
