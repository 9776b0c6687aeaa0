//! Core traits for the record preparation pipeline.
//!
//! This module defines the `RecordStage` trait that allows composable,
//! extensible cleaning steps to run over catalog records before they are
//! loaded.

use anyhow::Result;
use catalog::MovieRecord;

/// One preparation step over the full record sequence.
///
/// ## Design Note
/// - `Send + Sync` so a built pipeline can be shared at startup
/// - Stages take ownership of the Vec and return the transformed Vec
/// - Stages must preserve the relative order of the records they keep,
///   because catalog row indices follow input order
pub trait RecordStage: Send + Sync {
    /// Returns the name of this stage (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this stage to the records.
    ///
    /// # Returns
    /// * `Ok(Vec<MovieRecord>)` - The transformed records
    /// * `Err` - If the stage cannot proceed
    fn apply(&self, records: Vec<MovieRecord>) -> Result<Vec<MovieRecord>>;
}
