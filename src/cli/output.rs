use crate::{MisspellResult, Mode};
use anyhow::{Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    mode: Mode,
    lines: usize,
    input: String,
    output: String,
}

/// Render a result in the requested format.
pub fn render(result: &MisspellResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.output.clone()),
        OutputFormat::Json => {
            let output = JsonOutput {
                mode: result.mode,
                lines: result.line_count,
                input: result.input.clone(),
                output: result.output.clone(),
            };
            serde_json::to_string_pretty(&output).context("Failed to serialize result")
        }
    }
}

/// Print a one-line summary of a run written to `destination`.
pub fn print_summary(result: &MisspellResult, destination: &Path, colored: bool) {
    let line_word = if result.line_count == 1 { "line" } else { "lines" };
    let changed = result
        .input
        .chars()
        .zip(result.output.chars())
        .filter(|(a, b)| a != b)
        .count()
        + result.input.chars().count().abs_diff(result.output.chars().count());

    let target = destination.display().to_string();

    if colored {
        eprintln!(
            "{} {} {} misspelled ({} mode, ~{} characters changed) → {}",
            "✓".green().bold(),
            result.line_count.to_string().green().bold(),
            line_word,
            result.mode.to_string().cyan(),
            changed,
            target.bold()
        );
    } else {
        eprintln!(
            "✓ {} {} misspelled ({} mode, ~{} characters changed) → {}",
            result.line_count, line_word, result.mode, changed, target
        );
    }
}
