//! # spellgraph
//!
//! Precomputed edit-distance-1 neighbor tables for spelling correction.
//!
//! ## Features
//!
//! - Neighbor generation by deletion, substitution, adjacent transposition
//!   and insertion over a configurable alphabet
//! - Forward tables (word to its neighbors) and reverse tables (misspelling
//!   to the words it can be corrected to)
//! - Parallel construction with deterministic output
//! - Frequency-list preprocessing and table lookup
//!
//! ## Example
//!
//! ```
//! use spellgraph::alphabet::Alphabet;
//! use spellgraph::graph::{GraphBuilder, GraphConfig};
//! use spellgraph::vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::from_words(["cat", "bat", "cot"]);
//! let builder = GraphBuilder::new(
//!     Alphabet::english(),
//!     GraphConfig::default().with_find_all(false),
//! )
//! .unwrap();
//!
//! let map = builder.build_forward(&vocabulary);
//! assert_eq!(map.get("bat").unwrap(), &["cat".to_string()]);
//! ```

pub mod alphabet;
pub mod cli;
pub mod error;
pub mod graph;
pub mod neighbor;
pub mod pipeline;
pub mod table;
pub mod vocabulary;

pub mod prelude {
    pub use crate::alphabet::Alphabet;
    pub use crate::error::{Result, SpellGraphError};
    pub use crate::graph::{AdjacencyMap, GraphBuilder, GraphConfig, GraphMode};
    pub use crate::neighbor::NeighborGenerator;
    pub use crate::pipeline::{BuildOutcome, BuildPipeline, BuildReport, PipelineConfig};
    pub use crate::table::{SuggestionTable, TableWriter};
    pub use crate::vocabulary::{Vocabulary, VocabularyLoader, WordSet};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
