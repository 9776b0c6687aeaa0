//! Review text preprocessing: accent stripping, tokenizing, stop words.

use unicode_normalization::UnicodeNormalization;

/// NLTK English stop word list.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
    "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
    "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Decompose (NFKD) and drop everything outside ASCII.
///
/// "café" -> "cafe"; characters with no ASCII base (e.g. CJK) disappear.
pub fn strip_accents_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// Lowercase, strip accents and split into word tokens.
///
/// A token is a maximal run of ASCII alphanumerics or `_` at least two
/// characters long, so punctuation splits words and single letters vanish.
pub fn tokenize(text: &str) -> Vec<String> {
    strip_accents_ascii(&text.to_lowercase())
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| token.len() >= 2)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents_ascii("café"), "cafe");
        assert_eq!(strip_accents_ascii("Señor Über"), "Senor Uber");
        assert_eq!(strip_accents_ascii("映画 film"), " film");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("A Naïve, heart-warming film!! 10/10"),
            vec!["naive", "heart", "warming", "film", "10", "10"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_symbols() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("?! ... a b").is_empty());
    }

    #[test]
    fn test_stop_words_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for word in ENGLISH_STOP_WORDS {
            assert_eq!(*word, word.to_lowercase());
            assert!(seen.insert(word), "duplicate stop word {word}");
        }
    }
}
