//! Owned adjacency maps produced by the graph builder.

use std::collections::hash_map::Entry;

use ahash::AHashMap;

/// Vocabulary word to its in-vocabulary neighbors.
///
/// Entries keep the order they were pushed in, which for maps built by
/// [`GraphBuilder`](crate::graph::GraphBuilder) is vocabulary order. Words
/// without neighbors are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ForwardMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the neighbors of `word`. An empty neighbor list is ignored.
    pub fn push(&mut self, word: String, neighbors: Vec<String>) {
        if !neighbors.is_empty() {
            self.entries.push((word, neighbors));
        }
    }

    /// Concatenate a partial map built over a later part of the vocabulary.
    pub fn append(&mut self, mut other: ForwardMap) {
        self.entries.append(&mut other.entries);
    }

    /// Neighbors of `word`, if it has any.
    ///
    /// Scans every entry, so it suits inspection and tests only. Query-time
    /// lookups go through [`SuggestionTable`](crate::table::SuggestionTable).
    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == word)
            .map(|(_, neighbors)| neighbors.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(word, neighbors)| (word.as_str(), neighbors.as_slice()))
    }

    /// Number of words with at least one neighbor.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, neighbors)| neighbors.len()).sum()
    }

    pub fn into_entries(self) -> Vec<(String, Vec<String>)> {
        self.entries
    }
}

/// Generated candidate to the vocabulary words reaching it in one edit.
#[derive(Debug, Clone, Default)]
pub struct ReverseMap {
    entries: AHashMap<String, Vec<String>>,
}

impl ReverseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `word` reaches `candidate`.
    pub fn insert(&mut self, candidate: String, word: &str) {
        self.entries
            .entry(candidate)
            .or_default()
            .push(word.to_string());
    }

    /// Merge a partial map built over a later part of the vocabulary.
    ///
    /// Source lists of shared keys are concatenated, so merging partials in
    /// vocabulary order keeps every list in vocabulary order.
    pub fn merge(&mut self, mut other: ReverseMap) {
        if self.entries.is_empty() {
            self.entries = other.entries;
            return;
        }

        for (candidate, mut words) in other.entries.drain() {
            match self.entries.entry(candidate) {
                Entry::Occupied(entry) => entry.into_mut().append(&mut words),
                Entry::Vacant(entry) => {
                    entry.insert(words);
                }
            }
        }
    }

    /// Vocabulary words reaching `candidate`.
    pub fn get(&self, candidate: &str) -> Option<&[String]> {
        self.entries.get(candidate).map(Vec::as_slice)
    }

    pub fn contains_key(&self, candidate: &str) -> bool {
        self.entries.contains_key(candidate)
    }

    /// Number of distinct candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (candidate, word) pairs.
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Entries sorted by candidate.
    pub fn sorted_entries(&self) -> Vec<(&str, &[String])> {
        let mut entries: Vec<(&str, &[String])> = self
            .entries
            .iter()
            .map(|(candidate, words)| (candidate.as_str(), words.as_slice()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
