//! Keyword extraction.
//!
//! Turns bookmark titles and URLs into normalized tokens: lower-cased, split on anything
//! that is not a word character, with short tokens and common URL/English noise removed.

use std::collections::{BTreeSet, HashSet};

/// Set of normalized keywords
pub type KeywordSet = BTreeSet<String>;

/// Tokens shorter than this are discarded
pub const MIN_KEYWORD_LENGTH: usize = 4;

/// Tokens discarded regardless of length
pub const STOP_WORDS: [&str; 10] = [
    "https", "http", "www", "com", "org", "net", "the", "and", "for", "with",
];

/// Keyword extractor with a length threshold and stop-word list
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_length: usize,
    stop_words: HashSet<String>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(MIN_KEYWORD_LENGTH, STOP_WORDS)
    }
}

impl KeywordExtractor {
    pub fn new<I, S>(min_length: usize, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            min_length,
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Extract the keyword set of `text`; absent or empty text yields an empty set
    pub fn extract(&self, text: Option<&str>) -> KeywordSet {
        let mut keywords = KeywordSet::new();
        self.extract_into(text, &mut keywords);
        keywords
    }

    /// Add the keywords of `text` to an existing set
    pub fn extract_into(&self, text: Option<&str>, keywords: &mut KeywordSet) {
        let Some(text) = text else {
            return;
        };
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        keywords.extend(
            normalized
                .split_whitespace()
                .filter(|token| token.chars().count() >= self.min_length)
                .filter(|token| !self.stop_words.contains(*token))
                .map(str::to_string),
        );
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// Extract keywords with the default threshold and stop words
pub fn extract(text: Option<&str>) -> KeywordSet {
    KeywordExtractor::default().extract(text)
}
