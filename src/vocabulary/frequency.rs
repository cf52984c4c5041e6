//! Frequency-list preprocessing.
//!
//! Turns a raw `word,count` list into a `word,score` list suitable as a
//! vocabulary source: counts are scaled down into a coarse score and the list
//! is cut after a fixed number of entries.

use std::io::{BufRead, Write};

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Divisor turning a raw corpus count into a score.
pub const BASE_SCORE: u64 = 1270;

/// Entry limit of [`CutLevel::Low`].
pub const WORD_LIMIT_LOW: usize = 72_000;

/// Entry limit of [`CutLevel::High`].
pub const WORD_LIMIT_HIGH: usize = 144_000;

/// Header line emitted by common frequency-list exports.
const HEADER: &str = "word,count";

/// How many entries to keep from the top of a frequency list.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutLevel {
    /// Keep the first 72 000 entries.
    Low,
    /// Keep the first 144 000 entries.
    High,
    /// Keep every entry.
    #[default]
    Full,
}

impl CutLevel {
    /// Maximum number of entries kept, `None` for no limit.
    pub fn limit(self) -> Option<usize> {
        match self {
            CutLevel::Low => Some(WORD_LIMIT_LOW),
            CutLevel::High => Some(WORD_LIMIT_HIGH),
            CutLevel::Full => None,
        }
    }
}

/// A word with its scaled score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub word: String,
    pub score: u64,
}

impl FrequencyEntry {
    /// Parse a `word,count` record and scale its count.
    pub fn parse(line: &str) -> Option<Self> {
        let (word, count) = line.trim_end_matches(['\r', '\n']).split_once(',')?;
        let word = word.trim();
        let count = count.trim();
        if word.is_empty() || count.is_empty() {
            return None;
        }

        let count: u64 = count.parse().ok()?;
        Some(FrequencyEntry {
            word: word.to_string(),
            score: scale_score(count),
        })
    }
}

/// Scale a raw count into a coarse score.
pub fn scale_score(count: u64) -> u64 {
    count / BASE_SCORE
}

/// Counters collected while cutting a frequency list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutStats {
    /// Lines read before the cut limit was reached.
    pub lines: usize,
    /// Entries written.
    pub kept: usize,
    /// Lines skipped as malformed.
    pub malformed: usize,
}

/// Copy the first entries of a `word,count` list as `word,score` lines.
///
/// Blank lines and the `word,count` header are ignored; records with an empty
/// column or an unparsable count are skipped and counted.
pub fn cut_frequency_list<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    level: CutLevel,
) -> Result<CutStats> {
    let limit = level.limit().unwrap_or(usize::MAX);
    let mut stats = CutStats::default();

    for (line_num, raw) in reader.split(b'\n').enumerate() {
        if stats.kept >= limit {
            break;
        }

        let raw = raw?;
        stats.lines += 1;

        let Ok(line) = String::from_utf8(raw) else {
            debug!("Skipping frequency line {}: not valid UTF-8", line_num + 1);
            stats.malformed += 1;
            continue;
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == HEADER {
            continue;
        }

        match FrequencyEntry::parse(trimmed) {
            Some(entry) => {
                writeln!(writer, "{},{}", entry.word, entry.score)?;
                stats.kept += 1;
            }
            None => {
                debug!("Skipping frequency line {}: {trimmed:?}", line_num + 1);
                stats.malformed += 1;
            }
        }
    }

    writer.flush()?;
    info!(
        "Cut frequency list: kept {} of {} lines ({} malformed)",
        stats.kept, stats.lines, stats.malformed
    );

    Ok(stats)
}
