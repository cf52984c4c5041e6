//! Command implementations for the spellgraph CLI.

use std::time::Instant;

use log::info;

use crate::alphabet::Alphabet;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::neighbor::NeighborGenerator;
use crate::pipeline::{BuildOutcome, BuildPipeline, CutConfig, PipelineConfig, run_cut};
use crate::table::SuggestionTable;
use crate::vocabulary::VocabularyLoader;

/// Execute a CLI command.
pub fn execute_command(args: SpellGraphArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build_table(build_args, &args),
        Command::Cut(cut_args) => cut_list(cut_args, &args),
        Command::Suggest(suggest_args) => suggest(suggest_args, &args),
        Command::Neighbors(neighbors_args) => show_neighbors(neighbors_args, &args),
    }
}

/// Merge the configuration file (if any) with explicit flags.
pub fn pipeline_config(args: &BuildArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            PipelineConfig::from_json_file(path)?
        }
        None => PipelineConfig::default(),
    };

    config.source = args.source.clone();
    config.destination = args.destination.clone();

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(alphabet) = &args.alphabet {
        config.alphabet = Alphabet::new(alphabet)?;
    }
    if args.vocabulary_only {
        config.find_all = false;
    }
    if args.no_overwrite {
        config.overwrite = false;
    }
    if let Some(threads) = args.threads {
        config.threads = Some(threads);
    }
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = Some(delimiter);
    }
    if args.strict_alphabet {
        config.strict_alphabet = true;
    }

    Ok(config)
}

/// Build a table.
fn build_table(args: &BuildArgs, cli_args: &SpellGraphArgs) -> Result<()> {
    let config = pipeline_config(args)?;
    let report = BuildPipeline::new(config)?.run()?;

    let message = match report.outcome {
        BuildOutcome::Built => format!("Built {:?} table", report.mode),
        BuildOutcome::Skipped => "Destination exists, build skipped".to_string(),
    };
    output_result(&message, &report, cli_args)
}

/// Cut a frequency list.
fn cut_list(args: &CutArgs, cli_args: &SpellGraphArgs) -> Result<()> {
    let config = CutConfig::new(&args.source, &args.destination)
        .with_level(args.level)
        .with_overwrite(!args.no_overwrite);
    let report = run_cut(&config)?;

    let message = match report.outcome {
        BuildOutcome::Built => "Frequency list cut",
        BuildOutcome::Skipped => "Destination exists, cut skipped",
    };
    output_result(message, &report, cli_args)
}

/// Look words up in a table.
fn suggest(args: &SuggestArgs, cli_args: &SpellGraphArgs) -> Result<()> {
    let start = Instant::now();
    let table = SuggestionTable::load_file(&args.table)?;

    let results = args
        .words
        .iter()
        .map(|word| WordList {
            word: word.clone(),
            closure_size: None,
            words: table.lookup(word).to_vec(),
        })
        .collect();

    output_result(
        "Suggestions",
        &SuggestResults {
            table: args.table.display().to_string(),
            results,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Expand words into their one-edit neighbors.
fn show_neighbors(args: &NeighborsArgs, cli_args: &SpellGraphArgs) -> Result<()> {
    let alphabet = match &args.alphabet {
        Some(letters) => Alphabet::new(letters)?,
        None => Alphabet::english(),
    };
    let generator = NeighborGenerator::new(alphabet);

    let vocabulary = match &args.vocabulary {
        Some(path) => Some(VocabularyLoader::new().load_file(path)?.0),
        None => None,
    };

    let results = args
        .words
        .iter()
        .map(|word| {
            let closure = generator.closure(word);
            let words = match &vocabulary {
                Some(vocabulary) => generator.known_neighbors(word, vocabulary),
                None if args.show_all => closure.clone(),
                None => Vec::new(),
            };
            WordList {
                word: word.clone(),
                closure_size: Some(closure.len()),
                words,
            }
        })
        .collect();

    output_result(
        "Neighbors",
        &NeighborResults {
            vocabulary: args.vocabulary.as_ref().map(|p| p.display().to_string()),
            results,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::graph::GraphMode;

    fn build_args(extra: &[&str]) -> BuildArgs {
        let mut argv = vec!["spellgraph", "build", "words.txt", "table.txt"];
        argv.extend_from_slice(extra);
        match SpellGraphArgs::parse_from(argv).command {
            Command::Build(build) => build,
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let config = pipeline_config(&build_args(&[])).unwrap();

        assert_eq!(config.source, PathBuf::from("words.txt"));
        assert_eq!(config.destination, PathBuf::from("table.txt"));
        assert!(config.find_all);
        assert!(config.overwrite);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{"mode": "reverse", "alphabet": "abc", "threads": 8, "find_all": true}"#,
        )
        .unwrap();

        let config_arg = config_path.to_str().unwrap();
        let config = pipeline_config(&build_args(&[
            "--config",
            config_arg,
            "--threads",
            "2",
            "--vocabulary-only",
        ]))
        .unwrap();

        assert_eq!(config.mode, GraphMode::Reverse);
        assert_eq!(config.alphabet.len(), 3);
        assert_eq!(config.threads, Some(2));
        assert!(!config.find_all);
    }

    #[test]
    fn test_invalid_alphabet_flag() {
        assert!(pipeline_config(&build_args(&["--alphabet", "ab;c"])).is_err());
    }
}
