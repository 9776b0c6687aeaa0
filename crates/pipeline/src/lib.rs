//! Pipeline for preparing catalog records and building feature bags.
//!
//! This crate provides:
//! - RecordStage trait and implementations for record cleaning
//! - RecordPipeline for composing stages
//! - Feature bag construction for the similarity index
//!
//! ## Architecture
//! Records flow through the pipeline once at startup:
//! 1. Stages fill missing values, normalize feature text and drop untitled rows
//! 2. The cleaned records are loaded into a `Catalog`
//! 3. One `FeatureBag` is built per catalog row and handed to the index
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_bags, RecordPipeline};
//!
//! let records = RecordPipeline::standard().apply(records)?;
//! let catalog = Catalog::load(records)?;
//! let bags = build_bags(&catalog);
//! ```

pub mod traits;
pub mod stages;
pub mod record_pipeline;
pub mod features;

// Re-export main types
pub use traits::RecordStage;
pub use record_pipeline::RecordPipeline;
pub use features::{build_bag, build_bags, FeatureBag};
