//! Stage that drops records with no usable title.

use crate::traits::RecordStage;
use anyhow::Result;
use catalog::{normalize_title, MovieRecord};
use tracing::warn;

/// Removes records whose title is empty after normalization.
///
/// Such a record can never be looked up, and loading it would make the
/// catalog reject the whole batch.
pub struct RequireTitle;

impl RecordStage for RequireTitle {
    fn name(&self) -> &str {
        "RequireTitle"
    }

    fn apply(&self, records: Vec<MovieRecord>) -> Result<Vec<MovieRecord>> {
        let kept = records
            .into_iter()
            .enumerate()
            .filter_map(|(input_row, record)| {
                if normalize_title(&record.title).is_empty() {
                    warn!(
                        input_row,
                        title = %record.title,
                        "Dropping record without a usable title"
                    );
                    None
                } else {
                    Some(record)
                }
            })
            .collect();
        Ok(kept)
    }
}
