//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellGraphArgs};
use crate::error::Result;

/// Result structure for table lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResults {
    pub table: String,
    pub results: Vec<WordList>,
    pub duration_ms: u64,
}

/// Result structure for neighbor inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct NeighborResults {
    pub vocabulary: Option<String>,
    pub results: Vec<WordList>,
}

/// A word and the list found for it.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordList {
    pub word: String,
    /// Size of the full one-edit closure, when computed.
    pub closure_size: Option<usize>,
    pub words: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SpellGraphArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SpellGraphArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match value.get("results").and_then(|r| r.as_array()) {
        Some(lists) => output_word_lists_human(lists),
        None => output_generic_human(&value),
    }
}

/// Output one line per looked-up word.
fn output_word_lists_human(lists: &[serde_json::Value]) -> Result<()> {
    for list in lists {
        let word = list.get("word").map(format_value).unwrap_or_default();
        let words = list
            .get("words")
            .and_then(|w| w.as_array())
            .map(|w| w.iter().map(format_value).collect::<Vec<_>>())
            .unwrap_or_default();

        match list.get("closure_size").and_then(|s| s.as_u64()) {
            Some(size) => println!("{word} ({size} candidates): {}", words.join(", ")),
            None if words.is_empty() => println!("{word}: (no entry)"),
            None => println!("{word}: {}", words.join(", ")),
        }
    }
    Ok(())
}

fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    for (key, val) in flatten(value, "") {
        println!("{key}: {val}");
    }
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &SpellGraphArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Flatten nested objects into dotted `key: value` pairs.
fn flatten(value: &serde_json::Value, prefix: &str) -> Vec<(String, String)> {
    match value {
        serde_json::Value::Object(obj) => obj
            .iter()
            .flat_map(|(key, val)| {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match val {
                    serde_json::Value::Object(_) => flatten(val, &key),
                    _ => vec![(key, format_value(val))],
                }
            })
            .collect(),
        _ => vec![(prefix.to_string(), format_value(value))],
    }
}

fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}
