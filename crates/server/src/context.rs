//! # Service Context
//!
//! Everything a query needs, built once at startup:
//! 1. Prepare records (`RecordPipeline::standard`)
//! 2. Load the catalog (row cap from config)
//! 3. Build feature bags and the similarity index
//! 4. Attach the loaded classifier artifact
//!
//! Nothing here is mutated after `build` returns, so a context can be
//! shared across tasks behind an `Arc` and queried concurrently.

use std::time::Instant;

use catalog::{Catalog, CatalogError, MovieRecord, RowIndex};
use pipeline::{build_bags, RecordPipeline};
use sentiment::ClassifierArtifact;
use similarity::{Neighbor, SimilarityIndex};
use tracing::{error, info, instrument};

use crate::config::ServiceConfig;
use crate::error::{QueryError, QueryResult, StartupError};
use crate::schema::{ReviewLabel, ReviewRequest, ReviewResponse, ScoredTitle, SimilarRequest, SimilarResponse};

pub struct ServiceContext {
    catalog: Catalog,
    index: SimilarityIndex,
    classifier: ClassifierArtifact,
    neighbor_count: usize,
}

impl ServiceContext {
    /// Build from in-memory records and an already loaded classifier.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(
        records: Vec<MovieRecord>,
        classifier: ClassifierArtifact,
        config: &ServiceConfig,
    ) -> Result<Self, StartupError> {
        let start = Instant::now();

        let records = RecordPipeline::standard().apply(records)?;
        let catalog = Catalog::load_with_limit(records, config.max_rows)?;
        let bags = build_bags(&catalog);
        let index = SimilarityIndex::build(&bags)?;

        info!(
            "Service context ready: {} titles ({} duplicates dropped), {} terms in {:?}",
            catalog.len(),
            catalog.duplicates_dropped(),
            index.vocabulary().len(),
            start.elapsed()
        );

        Ok(Self {
            catalog,
            index,
            classifier,
            neighbor_count: config.neighbor_count,
        })
    }

    /// Read the catalog CSV and artifact directory named in the config.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StartupError> {
        info!("Loading catalog from {}", config.catalog_path.display());
        let records = catalog::parser::read_records(&config.catalog_path, config.max_rows)?;
        let classifier = ClassifierArtifact::load_from_dir(&config.artifact_dir)?;
        Self::build(records, classifier, config)
    }

    /// Up to `neighbor_count` display titles most similar to `title`.
    pub fn similar(&self, title: &str) -> QueryResult<Vec<String>> {
        Ok(self
            .similar_scored(title)?
            .into_iter()
            .map(|scored| scored.title)
            .collect())
    }

    /// Like [`similar`](Self::similar), with cosine scores attached
    #[instrument(skip(self))]
    pub fn similar_scored(&self, title: &str) -> QueryResult<Vec<ScoredTitle>> {
        let row = self.resolve(title)?;

        let neighbors = self
            .index
            .neighbors(row, self.neighbor_count)
            .map_err(|e| {
                error!(title, row, error = %e, "Neighbor query failed");
                QueryError::Internal(e.to_string())
            })?;

        neighbors
            .into_iter()
            .map(|Neighbor { row, score }| {
                let title = self.display_title(row)?;
                Ok(ScoredTitle { title, score })
            })
            .collect()
    }

    pub fn handle_similar(&self, request: &SimilarRequest) -> QueryResult<SimilarResponse> {
        Ok(SimilarResponse {
            query: request.query.clone(),
            titles: self.similar(&request.query)?,
        })
    }

    /// Label a review text. Total over all strings.
    pub fn classify_review(&self, text: &str) -> ReviewLabel {
        self.classifier.classify(text).into()
    }

    pub fn handle_review(&self, request: &ReviewRequest) -> ReviewResponse {
        ReviewResponse {
            label: self.classify_review(&request.text),
        }
    }

    /// All display titles in row order (autocomplete source)
    pub fn titles(&self) -> Vec<&str> {
        self.catalog.all_titles()
    }

    /// Display titles containing `fragment`, case-insensitive
    pub fn search(&self, fragment: &str, limit: usize) -> Vec<&str> {
        self.catalog
            .search(fragment, limit)
            .into_iter()
            .filter_map(|row| self.catalog.title_at(row).ok())
            .collect()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn classifier(&self) -> &ClassifierArtifact {
        &self.classifier
    }

    fn resolve(&self, title: &str) -> QueryResult<RowIndex> {
        self.catalog.resolve_title(title).map_err(|e| match e {
            CatalogError::TitleNotFound { title } => QueryError::TitleNotFound { title },
            other => {
                error!(title, error = %other, "Title lookup failed");
                QueryError::Internal(other.to_string())
            }
        })
    }

    fn display_title(&self, row: RowIndex) -> QueryResult<String> {
        self.catalog
            .title_at(row)
            .map(str::to_string)
            .map_err(|e| {
                error!(row, error = %e, "Neighbor row missing from catalog");
                QueryError::Internal(e.to_string())
            })
    }
}
