//! The RecordPipeline orchestrates multiple preparation stages.

use crate::stages::{FillUnknown, NormalizeFeatureText, RequireTitle};
use crate::traits::RecordStage;
use anyhow::{Context, Result};
use catalog::MovieRecord;
use tracing;

/// Chains preparation stages together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = RecordPipeline::new()
///     .add_stage(FillUnknown)
///     .add_stage(NormalizeFeatureText)
///     .add_stage(RequireTitle);
///
/// let records = pipeline.apply(records)?;
/// ```
pub struct RecordPipeline {
    stages: Vec<Box<dyn RecordStage>>,
}

impl RecordPipeline {
    /// Create a new empty RecordPipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard preparation used before catalog load:
    /// sentinel fill, feature text normalization, then title check.
    pub fn standard() -> Self {
        Self::new()
            .add_stage(FillUnknown)
            .add_stage(NormalizeFeatureText)
            .add_stage(RequireTitle)
    }

    /// Add a stage to the pipeline (builder pattern).
    pub fn add_stage(mut self, stage: impl RecordStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the configured stages, in order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Apply all stages in sequence to the records.
    pub fn apply(&self, records: Vec<MovieRecord>) -> Result<Vec<MovieRecord>> {
        let mut current = records;
        for stage in &self.stages {
            let before = current.len();
            current = stage
                .apply(current)
                .with_context(|| format!("Record stage {} failed", stage.name()))?;
            tracing::debug!(
                "Stage {} applied (input count: {}, output count: {})",
                stage.name(),
                before,
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for RecordPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use catalog::UNKNOWN;

    struct Reject;

    impl RecordStage for Reject {
        fn name(&self) -> &str {
            "Reject"
        }

        fn apply(&self, _records: Vec<MovieRecord>) -> Result<Vec<MovieRecord>> {
            bail!("nope")
        }
    }

    fn records() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("Up", "Animation", "", "Ed Asner", "", ""),
            MovieRecord::new("Saw", "Horror", "James Wan", "", "", ""),
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = RecordPipeline::new();

        let out = pipeline.apply(records()).unwrap();
        assert_eq!(out, records());
    }

    #[test]
    fn test_standard_pipeline() {
        let pipeline = RecordPipeline::standard();
        assert_eq!(
            pipeline.stage_names(),
            vec!["FillUnknown", "NormalizeFeatureText", "RequireTitle"]
        );

        let out = pipeline.apply(records()).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].director, UNKNOWN);
        assert_eq!(out[0].actor1, "ed asner");
        assert_eq!(out[1].genres, "horror");
    }

    #[test]
    fn test_stage_error_names_stage() {
        let pipeline = RecordPipeline::new().add_stage(FillUnknown).add_stage(Reject);

        let err = pipeline.apply(records()).unwrap_err();
        assert!(err.to_string().contains("Reject"));
    }
}
