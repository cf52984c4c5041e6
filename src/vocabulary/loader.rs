//! Loading a vocabulary from a word list.
//!
//! The input is plain text with one token per line. When a column delimiter
//! is configured, each line is a delimited record (for example `word,score`)
//! and the first column is taken as the word. Lines that cannot yield a word
//! are skipped and counted in [`LoadStats`]; they never abort a load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{Result, SpellGraphError};
use crate::table::{ENTRY_SEPARATOR, KEY_SEPARATOR};
use crate::vocabulary::Vocabulary;

/// Counters collected while loading a vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Total lines read.
    pub lines: usize,
    /// Unique words accepted.
    pub words: usize,
    /// Lines repeating an already accepted word.
    pub duplicates: usize,
    /// Lines skipped as malformed.
    pub malformed: usize,
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedLine {
    /// Blank line or empty word column.
    EmptyToken,
    /// A delimited record with an unexpected number of columns.
    ColumnCount { expected: usize, found: usize },
    /// The word contains whitespace, so it is not a single token.
    NotAToken,
    /// The word contains `^` or `;`, which the table format cannot carry.
    Separator,
    /// The word uses a character outside the configured alphabet.
    OutsideAlphabet(char),
    /// The line is not valid UTF-8.
    InvalidUtf8,
}

/// Reads word lists into a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct VocabularyLoader {
    delimiter: Option<char>,
    columns: usize,
    alphabet: Option<Alphabet>,
}

impl Default for VocabularyLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyLoader {
    /// A loader for plain one-word-per-line files.
    pub fn new() -> Self {
        VocabularyLoader {
            delimiter: None,
            columns: 2,
            alphabet: None,
        }
    }

    /// Treat each line as a delimited record whose first column is the word.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Number of columns a delimited record must have (default 2).
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Reject words using characters outside `alphabet`.
    pub fn with_strict_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Load a vocabulary from a file.
    ///
    /// Fails with [`SpellGraphError::MissingInput`] when `path` is not a file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<(Vocabulary, LoadStats)> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SpellGraphError::missing_input(path));
        }

        info!("Loading vocabulary from {}", path.display());
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }

    /// Load a vocabulary from any buffered reader.
    pub fn load<R: BufRead>(&self, reader: R) -> Result<(Vocabulary, LoadStats)> {
        let mut stats = LoadStats::default();
        let mut seen: AHashSet<String> = AHashSet::new();

        for (line_num, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            stats.lines += 1;

            let Ok(line) = String::from_utf8(raw) else {
                debug!("Skipping line {}: {:?}", line_num + 1, MalformedLine::InvalidUtf8);
                stats.malformed += 1;
                continue;
            };

            match self.parse_line(&line) {
                Ok(word) => {
                    if seen.contains(word) {
                        stats.duplicates += 1;
                    } else {
                        seen.insert(word.to_string());
                    }
                }
                Err(reason) => {
                    debug!("Skipping line {}: {:?}", line_num + 1, reason);
                    stats.malformed += 1;
                }
            }
        }

        let vocabulary = Vocabulary::from_words(seen);
        stats.words = vocabulary.len();

        info!(
            "Loaded {} words ({} lines, {} duplicates, {} malformed)",
            stats.words, stats.lines, stats.duplicates, stats.malformed
        );

        Ok((vocabulary, stats))
    }

    /// Extract the word from a single line.
    pub fn parse_line<'a>(&self, line: &'a str) -> std::result::Result<&'a str, MalformedLine> {
        let line = line.trim_end_matches(['\r', '\n']);

        let word = match self.delimiter {
            Some(delimiter) => {
                let found = line.split(delimiter).count();
                if found != self.columns {
                    return Err(MalformedLine::ColumnCount {
                        expected: self.columns,
                        found,
                    });
                }
                line.split(delimiter).next().unwrap_or_default().trim()
            }
            None => line.trim(),
        };

        if word.is_empty() {
            return Err(MalformedLine::EmptyToken);
        }
        if word.chars().any(char::is_whitespace) {
            return Err(MalformedLine::NotAToken);
        }
        if word.contains([KEY_SEPARATOR, ENTRY_SEPARATOR]) {
            return Err(MalformedLine::Separator);
        }
        if let Some(alphabet) = &self.alphabet
            && let Some(c) = word.chars().find(|c| !alphabet.contains(*c))
        {
            return Err(MalformedLine::OutsideAlphabet(c));
        }

        Ok(word)
    }
}
