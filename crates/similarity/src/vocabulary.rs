//! Vocabulary learned from the feature bag corpus.
//!
//! Fit once over every bag and never updated: adding a movie means
//! rebuilding the whole index.

use pipeline::FeatureBag;
use std::collections::{BTreeSet, HashMap};

/// Term <-> column mapping.
///
/// Terms are sorted lexicographically, so the column of a term only depends
/// on the corpus contents and not on hash ordering.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect every whitespace-delimited token in the corpus.
    ///
    /// Tokens are taken as given; callers normalize case beforehand.
    pub fn fit<'a>(bags: impl IntoIterator<Item = &'a FeatureBag>) -> Self {
        let unique: BTreeSet<&str> = bags.into_iter().flat_map(|bag| bag.tokens()).collect();

        let terms: Vec<String> = unique.into_iter().map(str::to_string).collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();

        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of a term, `None` when out of vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term stored at a column
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sorted_unique() {
        let bags = vec![
            FeatureBag::from("drama unknown unknown"),
            FeatureBag::from("action drama"),
        ];

        let vocab = Vocabulary::fit(&bags);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.term(0), Some("action"));
        assert_eq!(vocab.column("drama"), Some(1));
        assert_eq!(vocab.column("unknown"), Some(2));
        assert_eq!(vocab.column("horror"), None);
    }

    #[test]
    fn test_fit_is_case_sensitive() {
        let bags = vec![FeatureBag::from("Drama drama")];
        assert_eq!(Vocabulary::fit(&bags).len(), 2);
    }
}
