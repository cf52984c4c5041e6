//! Query-time access to a serialized table.
//!
//! Either table format can be loaded; a trailing `;` and empty list items are
//! tolerated. Lookups return the stored list verbatim, unranked.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info};

use crate::error::{Result, SpellGraphError};
use crate::table::{ENTRY_SEPARATOR, KEY_SEPARATOR};

/// An in-memory table loaded from its text encoding.
#[derive(Debug, Clone, Default)]
pub struct SuggestionTable {
    entries: AHashMap<String, Vec<String>>,
    malformed: usize,
}

impl SuggestionTable {
    /// Load a table from a file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SpellGraphError::missing_input(path));
        }

        let table = Self::load(BufReader::new(File::open(path)?))?;
        info!(
            "Loaded table {} ({} keys, {} malformed lines)",
            path.display(),
            table.len(),
            table.malformed
        );
        Ok(table)
    }

    /// Load a table from any buffered reader.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = SuggestionTable::default();

        for (line_num, raw) in reader.split(b'\n').enumerate() {
            let Ok(line) = String::from_utf8(raw?) else {
                debug!("Skipping table line {}: not valid UTF-8", line_num + 1);
                table.malformed += 1;
                continue;
            };
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }

            let Some((key, list)) = line.split_once(KEY_SEPARATOR) else {
                debug!("Skipping table line {}: missing '{KEY_SEPARATOR}'", line_num + 1);
                table.malformed += 1;
                continue;
            };
            if key.is_empty() {
                table.malformed += 1;
                continue;
            }

            let values = list
                .split(ENTRY_SEPARATOR)
                .filter(|value| !value.is_empty())
                .map(str::to_string);
            table
                .entries
                .entry(key.to_string())
                .or_default()
                .extend(values);
        }

        Ok(table)
    }

    /// The list stored for `word`, empty when the table has no such key.
    pub fn lookup(&self, word: &str) -> &[String] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines skipped while loading.
    pub fn malformed(&self) -> usize {
        self.malformed
    }
}
