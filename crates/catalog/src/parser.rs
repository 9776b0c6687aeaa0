//! Reader for the prepared movie dataset.
//!
//! The ingestion pipeline produces one CSV with a header row:
//!
//! ```text
//! movie_title,genres,director_name,actor_1_name,actor_2_name,actor_3_name[,all_info]
//! ```
//!
//! Extra columns (such as the precomputed `all_info`) are ignored; feature
//! text is always rebuilt from the individual fields. Empty cells become the
//! "unknown" sentinel so downstream code never sees a missing value.

use crate::error::{CatalogError, Result};
use crate::types::{MovieRecord, UNKNOWN};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// One CSV row as it appears on disk
#[derive(Debug, Deserialize)]
struct RawMovieRow {
    movie_title: Option<String>,
    genres: Option<String>,
    director_name: Option<String>,
    actor_1_name: Option<String>,
    actor_2_name: Option<String>,
    actor_3_name: Option<String>,
}

impl RawMovieRow {
    fn into_record(self) -> MovieRecord {
        MovieRecord {
            title: self.movie_title.unwrap_or_default(),
            genres: or_unknown(self.genres),
            director: or_unknown(self.director_name),
            actor1: or_unknown(self.actor_1_name),
            actor2: or_unknown(self.actor_2_name),
            actor3: or_unknown(self.actor_3_name),
        }
    }
}

/// Replace a missing or blank cell with the sentinel
fn or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}

/// Read at most `max_rows` data rows from the prepared dataset
pub fn read_records(path: &Path, max_rows: usize) -> Result<Vec<MovieRecord>> {
    let file = File::open(path).map_err(|_| CatalogError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_records(file, &file_name, max_rows)
}

/// Parse records from any CSV source
///
/// `file_name` is only used in error messages.
pub fn parse_records<R: std::io::Read>(
    reader: R,
    file_name: &str,
    max_rows: usize,
) -> Result<Vec<MovieRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize::<RawMovieRow>().take(max_rows) {
        let row = result.map_err(|e| CatalogError::ParseError {
            file: file_name.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        records.push(row.into_record());
    }

    debug!("Parsed {} rows from {}", records.len(), file_name);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
movie_title,genres,director_name,actor_1_name,actor_2_name,actor_3_name,all_info
avatar,Action Adventure Fantasy Sci-Fi,James Cameron,CCH Pounder,Joel David Moore,Wes Studi,ignored
\"crouching tiger, hidden dragon\",Action Drama,Ang Lee,Chow Yun-Fat,,,ignored
";

    #[test]
    fn test_parse_records() {
        let records = parse_records(SAMPLE.as_bytes(), "sample.csv", 100).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "avatar");
        assert_eq!(records[0].director, "James Cameron");
        assert_eq!(records[1].title, "crouching tiger, hidden dragon");
        assert_eq!(records[1].actor2, UNKNOWN);
        assert_eq!(records[1].actor3, UNKNOWN);
    }

    #[test]
    fn test_parse_respects_row_cap() {
        let records = parse_records(SAMPLE.as_bytes(), "sample.csv", 1).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_records(Path::new("/definitely/not/here.csv"), 10).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
