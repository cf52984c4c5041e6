//! Flat text encodings of the adjacency maps.
//!
//! One entry per line, the key separated from its list by `^` and list items
//! separated by `;`:
//!
//! ```text
//! forward:  cat^bat;cot;cats;
//! reverse:  cet^cat;cot
//! ```
//!
//! Forward lines end with a trailing `;`, reverse lines do not. Nothing is
//! escaped, so keys and list items must never contain either separator.

pub mod reader;
pub mod writer;

pub use self::reader::SuggestionTable;
pub use self::writer::TableWriter;

/// Separates the key from its list.
pub const KEY_SEPARATOR: char = '^';

/// Separates list items.
pub const ENTRY_SEPARATOR: char = ';';
