use crate::error::StartupError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service configuration. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Prepared catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Directory holding `transform.bin` and `sentiment_model.bin`
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Catalog row cap; bounds the n² similarity matrix
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Titles returned per similarity query
    #[serde(default = "default_neighbor_count")]
    pub neighbor_count: usize,

    #[serde(default = "default_review_timeout_ms")]
    pub review_timeout_ms: u64,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("final_data.csv")
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_max_rows() -> usize {
    catalog::DEFAULT_MAX_ROWS
}

fn default_neighbor_count() -> usize {
    10
}

fn default_review_timeout_ms() -> u64 {
    5000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            artifact_dir: default_artifact_dir(),
            max_rows: default_max_rows(),
            neighbor_count: default_neighbor_count(),
            review_timeout_ms: default_review_timeout_ms(),
        }
    }
}

impl ServiceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, StartupError> {
        serde_json::from_str(json).map_err(|e| StartupError::Config(e.to_string()))
    }

    /// Load a JSON config file
    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StartupError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn review_timeout(&self) -> Duration {
        Duration::from_millis(self.review_timeout_ms)
    }
}
