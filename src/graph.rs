//! Edit-distance-1 graph construction.
//!
//! The [`GraphBuilder`] drives the [`NeighborGenerator`] over every word of a
//! [`Vocabulary`] and assembles either a forward map (word to neighbors) or a
//! reverse map (candidate to the words reaching it).
//!
//! Words are independent of each other, so the sorted vocabulary is split into
//! contiguous shards processed on a rayon pool. Each shard yields an owned
//! partial map; partials are merged in shard order, which keeps the result
//! identical to a single-threaded pass whatever the thread count.

pub mod adjacency;
pub mod progress;

use std::time::Instant;

use clap::ValueEnum;
use log::{info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

pub use self::adjacency::{ForwardMap, ReverseMap};
use self::progress::ProgressTracker;
use crate::alphabet::Alphabet;
use crate::error::{Result, SpellGraphError};
use crate::neighbor::NeighborGenerator;
use crate::vocabulary::Vocabulary;

/// Default number of words between progress checkpoints.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;

/// Shards per worker thread; more shards even out uneven word lengths.
const SHARDS_PER_THREAD: usize = 4;

/// Which adjacency map to build.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    /// Word to its neighbors.
    #[default]
    Forward,
    /// Candidate to the words reaching it.
    Reverse,
}

/// Configuration for graph construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Keep every generated candidate instead of only vocabulary words.
    pub find_all: bool,

    /// Worker threads. If None, uses the number of CPU cores.
    pub threads: Option<usize>,

    /// Words between progress checkpoints, zero to disable.
    pub progress_interval: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            find_all: true,
            threads: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl GraphConfig {
    pub fn with_find_all(mut self, find_all: bool) -> Self {
        self.find_all = find_all;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// Either adjacency map.
#[derive(Debug, Clone)]
pub enum AdjacencyMap {
    Forward(ForwardMap),
    Reverse(ReverseMap),
}

impl AdjacencyMap {
    pub fn mode(&self) -> GraphMode {
        match self {
            AdjacencyMap::Forward(_) => GraphMode::Forward,
            AdjacencyMap::Reverse(_) => GraphMode::Reverse,
        }
    }

    /// Number of keys, which is the number of lines the table will have.
    pub fn len(&self) -> usize {
        match self {
            AdjacencyMap::Forward(map) => map.len(),
            AdjacencyMap::Reverse(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn edge_count(&self) -> usize {
        match self {
            AdjacencyMap::Forward(map) => map.edge_count(),
            AdjacencyMap::Reverse(map) => map.edge_count(),
        }
    }
}

/// Builds adjacency maps over a vocabulary.
pub struct GraphBuilder {
    generator: NeighborGenerator,
    config: GraphConfig,
    thread_pool: ThreadPool,
}

impl GraphBuilder {
    /// Create a builder and its worker pool.
    pub fn new(alphabet: Alphabet, config: GraphConfig) -> Result<Self> {
        let threads = match config.threads {
            Some(0) => {
                return Err(SpellGraphError::invalid_config(
                    "thread count must be at least 1",
                ));
            }
            Some(n) => n,
            None => num_cpus::get(),
        };

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("spellgraph-{i}"))
            .build()
            .map_err(|e| SpellGraphError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(GraphBuilder {
            generator: NeighborGenerator::new(alphabet),
            config,
            thread_pool,
        })
    }

    pub fn generator(&self) -> &NeighborGenerator {
        &self.generator
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the map selected by `mode`.
    pub fn build(&self, vocabulary: &Vocabulary, mode: GraphMode) -> AdjacencyMap {
        match mode {
            GraphMode::Forward => AdjacencyMap::Forward(self.build_forward(vocabulary)),
            GraphMode::Reverse => AdjacencyMap::Reverse(self.build_reverse(vocabulary)),
        }
    }

    /// Map every vocabulary word to its neighbors, skipping words with none.
    pub fn build_forward(&self, vocabulary: &Vocabulary) -> ForwardMap {
        let start = Instant::now();
        let progress = ProgressTracker::new(self.config.progress_interval, vocabulary.len());
        let find_all = self.config.find_all;

        let partials: Vec<ForwardMap> = self.run_sharded(vocabulary, |shard| {
            let mut partial = ForwardMap::new();
            for word in shard {
                let neighbors = self.generator.neighbors(word, vocabulary, find_all);
                partial.push(word.clone(), neighbors);
                progress.tick();
            }
            partial
        });

        let mut map = ForwardMap::new();
        for partial in partials {
            map.append(partial);
        }

        info!(
            "Built forward map: {} of {} words have neighbors, {} edges in {:?}",
            map.len(),
            progress.processed(),
            map.edge_count(),
            start.elapsed()
        );
        map
    }

    /// Map every generated candidate to the vocabulary words reaching it.
    pub fn build_reverse(&self, vocabulary: &Vocabulary) -> ReverseMap {
        let start = Instant::now();
        let progress = ProgressTracker::new(self.config.progress_interval, vocabulary.len());
        let find_all = self.config.find_all;
        if !find_all {
            warn!(
                "Building a reverse map with vocabulary-only candidates; \
                 misspellings outside the vocabulary will have no entry"
            );
        }

        let partials: Vec<ReverseMap> = self.run_sharded(vocabulary, |shard| {
            let mut partial = ReverseMap::new();
            for word in shard {
                for candidate in self.generator.neighbors(word, vocabulary, find_all) {
                    partial.insert(candidate, word);
                }
                progress.tick();
            }
            partial
        });

        let mut map = ReverseMap::new();
        for partial in partials {
            map.merge(partial);
        }

        info!(
            "Built reverse map: {} candidates from {} words, {} edges in {:?}",
            map.len(),
            progress.processed(),
            map.edge_count(),
            start.elapsed()
        );
        map
    }

    /// Apply `f` to contiguous shards of the vocabulary on the pool, returning
    /// the per-shard results in vocabulary order.
    fn run_sharded<T, F>(&self, vocabulary: &Vocabulary, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&[String]) -> T + Sync,
    {
        let words = vocabulary.words();
        if words.is_empty() {
            return Vec::new();
        }

        let shards = self.thread_pool.current_num_threads() * SHARDS_PER_THREAD;
        let shard_size = words.len().div_ceil(shards).max(1);

        self.thread_pool
            .install(|| words.par_chunks(shard_size).map(&f).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(config: GraphConfig) -> GraphBuilder {
        GraphBuilder::new(Alphabet::english(), config).unwrap()
    }

    fn sorted(words: &[String]) -> Vec<&str> {
        let mut words: Vec<&str> = words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    #[test]
    fn test_forward_scenario() {
        let vocabulary = Vocabulary::from_words(["cat", "cats", "bat", "cot"]);
        let builder = builder(GraphConfig::default().with_find_all(false).with_threads(2));

        let map = builder.build_forward(&vocabulary);

        assert_eq!(map.len(), 4);
        assert_eq!(sorted(map.get("cat").unwrap()), vec!["bat", "cats", "cot"]);
        assert_eq!(map.get("bat").unwrap(), &["cat".to_string()]);
        assert_eq!(map.get("cot").unwrap(), &["cat".to_string()]);
        assert_eq!(map.get("cats").unwrap(), &["cat".to_string()]);

        let words: Vec<&str> = map.iter().map(|(word, _)| word).collect();
        assert_eq!(words, vec!["bat", "cat", "cats", "cot"]);
    }

    #[test]
    fn test_forward_skips_isolated_words() {
        let vocabulary = Vocabulary::from_words(["cat", "zebra"]);
        let map = builder(GraphConfig::default().with_find_all(false)).build_forward(&vocabulary);

        assert!(map.is_empty());
    }

    #[test]
    fn test_forward_find_all_uses_full_closure() {
        let vocabulary = Vocabulary::from_words(["ab"]);
        let builder = builder(GraphConfig::default());

        let map = builder.build_forward(&vocabulary);
        let closure = builder.generator().closure("ab");
        assert_eq!(map.get("ab").unwrap(), closure.as_slice());
    }

    #[test]
    fn test_reverse_lists_follow_vocabulary_order() {
        let vocabulary = Vocabulary::from_words(["cot", "bat", "cat"]);
        let map = builder(GraphConfig::default().with_threads(3)).build_reverse(&vocabulary);

        // "cat" is reachable from both "bat" and "cot"
        assert_eq!(
            map.get("cat").unwrap(),
            &["bat".to_string(), "cot".to_string()]
        );
        assert_eq!(
            map.get("cet").unwrap(),
            &["cat".to_string(), "cot".to_string()]
        );
        assert!(map.get("xyzzy").is_none());
    }

    #[test]
    fn test_reverse_vocabulary_only_keys_are_words() {
        let vocabulary = Vocabulary::from_words(["cat", "cot", "dog"]);
        let map = builder(GraphConfig::default().with_find_all(false)).build_reverse(&vocabulary);

        let keys: Vec<&str> = map.sorted_entries().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["cat", "cot"]);
        assert!(!map.contains_key("cet"));
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let words: Vec<String> = ["a", "an", "and", "ant", "at", "bat", "cat", "tab", "tan"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let vocabulary = Vocabulary::from_words(words);

        let single = builder(GraphConfig::default().with_threads(1)).build_reverse(&vocabulary);
        let many = builder(GraphConfig::default().with_threads(4)).build_reverse(&vocabulary);

        assert_eq!(single.sorted_entries(), many.sorted_entries());

        let single = builder(GraphConfig::default().with_threads(1).with_find_all(false))
            .build_forward(&vocabulary);
        let many = builder(GraphConfig::default().with_threads(4).with_find_all(false))
            .build_forward(&vocabulary);
        assert_eq!(single, many);
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocabulary = Vocabulary::new();
        let builder = builder(GraphConfig::default());

        assert!(builder.build(&vocabulary, GraphMode::Forward).is_empty());
        assert!(builder.build(&vocabulary, GraphMode::Reverse).is_empty());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = GraphBuilder::new(Alphabet::english(), GraphConfig::default().with_threads(0));
        assert!(matches!(result, Err(SpellGraphError::Config(_))));
    }

    #[test]
    fn test_adjacency_map_mode() {
        let vocabulary = Vocabulary::from_words(["ab", "ba"]);
        let builder = builder(GraphConfig::default().with_find_all(false));

        let forward = builder.build(&vocabulary, GraphMode::Forward);
        assert_eq!(forward.mode(), GraphMode::Forward);
        assert_eq!(forward.len(), 2);
        assert_eq!(forward.edge_count(), 2);

        let reverse = builder.build(&vocabulary, GraphMode::Reverse);
        assert_eq!(reverse.mode(), GraphMode::Reverse);
        assert_eq!(reverse.len(), 2);
    }
}
