//! The working word set consumed by the graph builder.
//!
//! A [`Vocabulary`] is built once (from a word list, see [`loader`]) and is
//! read-only afterwards. Words are kept sorted so every pass over the
//! vocabulary visits them in the same order, which makes the generated
//! tables reproducible byte for byte.

pub mod frequency;
pub mod loader;

use std::collections::HashSet;
use std::hash::BuildHasher;

use ahash::AHashSet;

pub use self::loader::{LoadStats, VocabularyLoader};

/// Membership test used to filter generated candidates.
pub trait WordSet {
    /// Whether `word` belongs to the set.
    fn contains_word(&self, word: &str) -> bool;
}

/// A deduplicated, sorted set of non-empty words.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Words in ascending order.
    words: Vec<String>,
    /// Hash index over `words` for O(1) membership.
    index: AHashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from arbitrary words. Empty strings are dropped and
    /// duplicates collapse into a single entry.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index: AHashSet<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.is_empty())
            .collect();

        let mut words: Vec<String> = index.iter().cloned().collect();
        words.sort_unstable();

        Vocabulary { words, index }
    }

    /// Words in iteration order (ascending).
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Check if a word exists in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length in characters of the longest word, zero when empty.
    pub fn max_word_len(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl WordSet for Vocabulary {
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl WordSet for AHashSet<String> {
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl<S: BuildHasher> WordSet for HashSet<String, S> {
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl WordSet for [&str] {
    fn contains_word(&self, word: &str) -> bool {
        self.iter().any(|candidate| *candidate == word)
    }
}

impl<'a> FromIterator<&'a str> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Vocabulary::from_words(iter)
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Vocabulary::from_words(iter)
    }
}
