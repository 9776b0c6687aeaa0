//! Feature bag construction.
//!
//! A movie's feature bag is its three lead actors, director and genres
//! joined into one whitespace-separated string. Bags are derived data:
//! always rebuilt from the record, never edited.

use catalog::{Catalog, MovieRecord};
use rayon::prelude::*;
use std::fmt;

/// Whitespace-joined feature text for one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBag(String);

impl FeatureBag {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-delimited tokens, case preserved
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl fmt::Display for FeatureBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureBag {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Build the bag for one record: actor1 actor2 actor3 director genres.
///
/// Pure and infallible; missing fields are expected to already hold the
/// "unknown" sentinel.
pub fn build_bag(record: &MovieRecord) -> FeatureBag {
    FeatureBag(record.feature_fields().join(" "))
}

/// Build bags for every catalog row, in row order.
///
/// ## Performance Note
/// Uses Rayon; `collect` on an indexed parallel iterator preserves order,
/// so `bags[i]` always belongs to catalog row `i`.
pub fn build_bags(catalog: &Catalog) -> Vec<FeatureBag> {
    let records: Vec<&MovieRecord> = catalog.records().collect();
    records.par_iter().map(|record| build_bag(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::UNKNOWN;

    #[test]
    fn test_build_bag_field_order() {
        let record = MovieRecord::new(
            "Up",
            "animation adventure",
            "pete docter",
            "ed asner",
            UNKNOWN,
            UNKNOWN,
        );

        let bag = build_bag(&record);

        assert_eq!(
            bag.as_str(),
            "ed asner unknown unknown pete docter animation adventure"
        );
        assert_eq!(bag.tokens().count(), 7);
    }

    #[test]
    fn test_build_bag_is_deterministic() {
        let record = MovieRecord::new("Heat", "Crime", "Michael Mann", "Al Pacino", "Robert De Niro", "Val Kilmer");
        assert_eq!(build_bag(&record), build_bag(&record));
    }

    #[test]
    fn test_build_bags_follow_rows() {
        let catalog = Catalog::load(vec![
            MovieRecord::new("A", "g1", "d1", "x", "y", "z"),
            MovieRecord::new("B", "g2", "d2", "x", "y", "z"),
            MovieRecord::new("a", "g3", "d3", "x", "y", "z"),
        ])
        .unwrap();

        let bags = build_bags(&catalog);

        assert_eq!(bags.len(), 2);
        assert_eq!(bags[0].as_str(), "x y z d1 g1");
        assert_eq!(bags[1].as_str(), "x y z d2 g2");
    }
}
