//! Error types for spellgraph.
//!
//! All fallible operations return [`SpellGraphError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use spellgraph::error::{Result, SpellGraphError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellGraphError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for spellgraph operations.
#[derive(Error, Debug)]
pub enum SpellGraphError {
    /// I/O errors (reading vocabularies, writing tables)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source file of a build or cut does not exist.
    #[error("Missing input: {}", .0.display())]
    MissingInput(PathBuf),

    /// The alphabet is empty, repeats a character or contains a separator.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A finished table could not be moved over its destination.
    #[error("Persist error: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying added context, such as the file being parsed
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpellGraphError.
pub type Result<T> = std::result::Result<T, SpellGraphError>;

impl SpellGraphError {
    /// Create a new missing input error.
    pub fn missing_input<P: Into<PathBuf>>(path: P) -> Self {
        SpellGraphError::MissingInput(path.into())
    }

    /// Create a new invalid alphabet error.
    pub fn invalid_alphabet<S: Into<String>>(msg: S) -> Self {
        SpellGraphError::InvalidAlphabet(msg.into())
    }

    /// Create a new configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellGraphError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpellGraphError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpellGraphError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SpellGraphError::Other(format!("Internal error: {}", msg.into()))
    }
}
