//! Command line argument parsing for the spellgraph CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::graph::GraphMode;
use crate::vocabulary::frequency::CutLevel;

/// spellgraph - precomputed edit-distance-1 tables for spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "spellgraph")]
#[command(about = "Build and query edit-distance-1 neighbor tables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellGraphArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellGraphArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a neighbor table from a word list
    Build(BuildArgs),

    /// Cut a word,count frequency list down to a vocabulary source
    Cut(CutArgs),

    /// Look words up in a built table
    Suggest(SuggestArgs),

    /// Show the one-edit neighbors of words
    Neighbors(NeighborsArgs),
}

/// Arguments for building a table
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Word list, one word per line
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Table file to write
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Forward (word to neighbors) or reverse (candidate to words)
    #[arg(short, long, env = "SPELLGRAPH_MODE")]
    pub mode: Option<GraphMode>,

    /// Letters used for insertions and substitutions
    #[arg(short, long, env = "SPELLGRAPH_ALPHABET")]
    pub alphabet: Option<String>,

    /// Keep only candidates that are vocabulary words
    #[arg(long)]
    pub vocabulary_only: bool,

    /// Leave an existing destination untouched
    #[arg(long, env = "SPELLGRAPH_NO_OVERWRITE")]
    pub no_overwrite: bool,

    /// Worker threads (default: number of CPU cores)
    #[arg(short, long, env = "SPELLGRAPH_THREADS")]
    pub threads: Option<usize>,

    /// Words between progress messages, 0 to disable
    #[arg(long, env = "SPELLGRAPH_PROGRESS_INTERVAL")]
    pub progress_interval: Option<usize>,

    /// Column delimiter for delimited word lists, e.g. ','
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Skip words with characters outside the alphabet
    #[arg(long)]
    pub strict_alphabet: bool,

    /// JSON configuration file; explicit flags take precedence
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SPELLGRAPH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for cutting a frequency list
#[derive(Parser, Debug, Clone)]
pub struct CutArgs {
    /// Frequency list with a word,count header
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// word,score list to write
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// How many entries to keep
    #[arg(short, long, default_value = "full", env = "SPELLGRAPH_CUT_LEVEL")]
    pub level: CutLevel,

    /// Leave an existing destination untouched
    #[arg(long, env = "SPELLGRAPH_NO_OVERWRITE")]
    pub no_overwrite: bool,
}

/// Arguments for table lookups
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Table built by the build command
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Words to look up
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for neighbor inspection
#[derive(Parser, Debug, Clone)]
pub struct NeighborsArgs {
    /// Words to expand
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Word list used to filter neighbors
    #[arg(long, value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Letters used for insertions and substitutions
    #[arg(short, long, env = "SPELLGRAPH_ALPHABET")]
    pub alphabet: Option<String>,

    /// Print every candidate of the closure, not only its size
    #[arg(long)]
    pub show_all: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
