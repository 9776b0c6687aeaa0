//! Stage implementations for the record pipeline.
//!
//! This module contains all the concrete stages that can be composed
//! into a RecordPipeline.

pub mod fill_unknown;
pub mod normalize_text;
pub mod require_title;

// Re-export for convenience
pub use fill_unknown::FillUnknown;
pub use normalize_text::NormalizeFeatureText;
pub use require_title::RequireTitle;
