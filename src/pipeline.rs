//! End-to-end batch jobs: building a table from a word list, and cutting a
//! frequency list into a vocabulary source.
//!
//! Both jobs share the same file semantics. A missing source fails with
//! [`SpellGraphError::MissingInput`] before anything is written; an existing
//! destination is left untouched when overwriting is disabled and the job is
//! reported as [`BuildOutcome::Skipped`]. Output goes to a temporary file next
//! to the destination and is moved into place only once complete.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::alphabet::Alphabet;
use crate::error::{Result, SpellGraphError};
use crate::graph::{DEFAULT_PROGRESS_INTERVAL, GraphBuilder, GraphConfig, GraphMode};
use crate::table::TableWriter;
use crate::vocabulary::frequency::{CutLevel, CutStats, cut_frequency_list};
use crate::vocabulary::{LoadStats, VocabularyLoader};

/// Mode of a newly created output file.
#[cfg(unix)]
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Configuration of a table build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Word list to read.
    pub source: PathBuf,

    /// Table file to write.
    pub destination: PathBuf,

    /// Forward or reverse table.
    pub mode: GraphMode,

    /// Letters used for insertions and substitutions.
    pub alphabet: Alphabet,

    /// Keep every generated candidate instead of only vocabulary words.
    pub find_all: bool,

    /// Replace an existing destination file.
    pub overwrite: bool,

    /// Worker threads. If None, uses the number of CPU cores.
    pub threads: Option<usize>,

    /// Words between progress checkpoints, zero to disable.
    pub progress_interval: usize,

    /// Column delimiter when the source is a delimited list (e.g. `word,score`).
    pub delimiter: Option<char>,

    /// Skip source words using characters outside the alphabet.
    pub strict_alphabet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            mode: GraphMode::Forward,
            alphabet: Alphabet::english(),
            find_all: true,
            overwrite: true,
            threads: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            delimiter: None,
            strict_alphabet: false,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration for the given source and destination.
    pub fn new<S: Into<PathBuf>, D: Into<PathBuf>>(source: S, destination: D) -> Self {
        PipelineConfig {
            source: source.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SpellGraphError::missing_input(path));
        }
        let reader = BufReader::new(File::open(path)?);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse configuration {}", path.display()))?;
        Ok(config)
    }

    pub fn with_mode(mut self, mode: GraphMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_find_all(mut self, find_all: bool) -> Self {
        self.find_all = find_all;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
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

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_strict_alphabet(mut self, strict: bool) -> Self {
        self.strict_alphabet = strict;
        self
    }

    /// Check that the configuration can run.
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(SpellGraphError::invalid_config("source path is empty"));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(SpellGraphError::invalid_config("destination path is empty"));
        }
        if self.threads == Some(0) {
            return Err(SpellGraphError::invalid_config(
                "thread count must be at least 1",
            ));
        }
        if let Some(delimiter) = self.delimiter
            && self.alphabet.contains(delimiter)
        {
            return Err(SpellGraphError::invalid_config(format!(
                "delimiter '{delimiter}' is part of the alphabet"
            )));
        }
        Ok(())
    }

    /// The graph-construction part of this configuration.
    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            find_all: self.find_all,
            threads: self.threads,
            progress_interval: self.progress_interval,
        }
    }

    fn loader(&self) -> VocabularyLoader {
        let mut loader = VocabularyLoader::new();
        if let Some(delimiter) = self.delimiter {
            loader = loader.with_delimiter(delimiter);
        }
        if self.strict_alphabet {
            loader = loader.with_strict_alphabet(self.alphabet.clone());
        }
        loader
    }
}

/// Whether a job produced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildOutcome {
    /// The destination was written.
    Built,
    /// The destination already existed and overwriting was disabled.
    Skipped,
}

/// Summary of a table build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub outcome: BuildOutcome,
    pub mode: GraphMode,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub started_at: DateTime<Utc>,
    /// Vocabulary load counters, absent when the build was skipped.
    pub load: Option<LoadStats>,
    /// Lines written to the table.
    pub entries_written: usize,
    /// (key, item) pairs written to the table.
    pub edges: usize,
    pub duration_ms: u64,
}

/// Builds a table file from a word list.
pub struct BuildPipeline {
    config: PipelineConfig,
}

impl BuildPipeline {
    /// Create a pipeline, validating its configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(BuildPipeline { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load, build and write.
    pub fn run(&self) -> Result<BuildReport> {
        let config = &self.config;
        let started_at = Utc::now();
        let start = Instant::now();

        if !config.source.is_file() {
            return Err(SpellGraphError::missing_input(&config.source));
        }

        let mut report = BuildReport {
            outcome: BuildOutcome::Skipped,
            mode: config.mode,
            source: config.source.clone(),
            destination: config.destination.clone(),
            started_at,
            load: None,
            entries_written: 0,
            edges: 0,
            duration_ms: 0,
        };

        if config.destination.exists() && !config.overwrite {
            warn!(
                "{} already exists and overwrite is disabled, skipping build",
                config.destination.display()
            );
            return Ok(report);
        }

        let (vocabulary, load_stats) = config.loader().load_file(&config.source)?;
        if load_stats.malformed > 0 {
            info!("Skipped {} malformed lines", load_stats.malformed);
        }

        let builder = GraphBuilder::new(config.alphabet.clone(), config.graph_config())?;
        let map = builder.build(&vocabulary, config.mode);

        let written = write_atomically(&config.destination, |writer| {
            let mut table = TableWriter::new(writer);
            let written = table.write_map(&map)?;
            table.finish()?;
            Ok(written)
        })?;

        report.outcome = BuildOutcome::Built;
        report.load = Some(load_stats);
        report.entries_written = written;
        report.edges = map.edge_count();
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Wrote {} entries to {} in {}ms",
            written,
            config.destination.display(),
            report.duration_ms
        );

        Ok(report)
    }
}

/// Configuration of a frequency-list cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub level: CutLevel,
    pub overwrite: bool,
}

impl CutConfig {
    pub fn new<S: Into<PathBuf>, D: Into<PathBuf>>(source: S, destination: D) -> Self {
        CutConfig {
            source: source.into(),
            destination: destination.into(),
            level: CutLevel::default(),
            overwrite: true,
        }
    }

    pub fn with_level(mut self, level: CutLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Summary of a frequency-list cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutReport {
    pub outcome: BuildOutcome,
    pub level: CutLevel,
    pub stats: Option<CutStats>,
    pub duration_ms: u64,
}

/// Cut a `word,count` list into a `word,score` list.
pub fn run_cut(config: &CutConfig) -> Result<CutReport> {
    let start = Instant::now();

    if !config.source.is_file() {
        return Err(SpellGraphError::missing_input(&config.source));
    }

    if config.destination.exists() && !config.overwrite {
        warn!(
            "{} already exists and overwrite is disabled, skipping cut",
            config.destination.display()
        );
        return Ok(CutReport {
            outcome: BuildOutcome::Skipped,
            level: config.level,
            stats: None,
            duration_ms: 0,
        });
    }

    let reader = BufReader::new(File::open(&config.source)?);
    let mut stats = None;
    write_atomically(&config.destination, |writer| {
        let cut = cut_frequency_list(reader, writer, config.level)?;
        let kept = cut.kept;
        stats = Some(cut);
        Ok(kept)
    })?;

    Ok(CutReport {
        outcome: BuildOutcome::Built,
        level: config.level,
        stats,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Write through a temporary file in the destination's directory, then move
/// it over `path`.
fn write_atomically<F>(path: &Path, write: F) -> Result<usize>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<usize>,
{
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    let written = {
        let mut writer = BufWriter::new(&mut temp_file);
        let written = write(&mut writer)?;
        writer.flush()?;
        written
    };

    // Temporary files are owner-only; the output keeps the destination's mode.
    if let Some(permissions) = output_permissions(path) {
        temp_file.as_file().set_permissions(permissions)?;
    }

    temp_file.persist(path)?;
    Ok(written)
}

/// Permissions for the file replacing `path`: those of the existing file,
/// otherwise [`DEFAULT_FILE_MODE`].
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(DEFAULT_FILE_MODE))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.find_all);
        assert!(config.overwrite);
        assert_eq!(config.mode, GraphMode::Forward);
        assert_eq!(config.alphabet, Alphabet::english());
        assert_eq!(config.progress_interval, 500);
    }

    #[test]
    fn test_validate() {
        assert!(PipelineConfig::default().validate().is_err());
        assert!(PipelineConfig::new("in.txt", "out.txt").validate().is_ok());
        assert!(
            PipelineConfig::new("in.txt", "out.txt")
                .with_threads(0)
                .validate()
                .is_err()
        );
        assert!(
            PipelineConfig::new("in.txt", "out.txt")
                .with_delimiter('a')
                .validate()
                .is_err()
        );
        assert!(
            PipelineConfig::new("in.txt", "out.txt")
                .with_delimiter(',')
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_config_json_partial() {
        let json = r#"{"source": "words.txt", "destination": "table.txt", "mode": "reverse", "alphabet": "abc"}"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.mode, GraphMode::Reverse);
        assert_eq!(config.alphabet.len(), 3);
        assert!(config.find_all);
        assert!(config.overwrite);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_config_json_rejects_bad_alphabet() {
        let json = r#"{"alphabet": "a^b"}"#;
        assert!(serde_json::from_str::<PipelineConfig>(json).is_err());
    }

    #[test]
    fn test_config_json_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PipelineConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, SpellGraphError::Anyhow(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;

        write_atomically(&path, |_| Ok(0)).unwrap();
        assert_eq!(mode(&path), DEFAULT_FILE_MODE);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        write_atomically(&path, |_| Ok(0)).unwrap();
        assert_eq!(mode(&path), 0o640);
    }

    #[test]
    fn test_write_atomically_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        let written = write_atomically(&path, |writer| {
            writeln!(writer, "hello")?;
            Ok(1)
        })
        .unwrap();

        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
