//! Sentence file readers

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// One sentence per record, taken from the first CSV field
    Csv,
    /// One sentence per line, blank lines skipped
    Txt,
    /// CoNLL-U carrying sentences and their parses together
    Conllu,
}

impl InputFormat {
    /// Lowercase name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Txt => "txt",
            InputFormat::Conllu => "conllu",
        }
    }
}

impl FromStr for InputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "txt" | "text" => Ok(InputFormat::Txt),
            "conllu" | "conll" => Ok(InputFormat::Conllu),
            other => Err(CliError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Reads sentence collections from disk
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read sentences in the given format
    ///
    /// CoNLL-U files are handled by the parser adapter and are rejected here.
    pub fn read_sentences(path: &Path, format: InputFormat) -> Result<Vec<String>> {
        log::info!("Reading {}", path.display());
        let sentences = match format {
            InputFormat::Csv => Self::read_csv(path)?,
            InputFormat::Txt => Self::read_txt(path)?,
            InputFormat::Conllu => {
                anyhow::bail!("CoNLL-U input is read through the parse adapter")
            }
        };
        log::info!(
            "Successfully imported {} sentences from {}",
            sentences.len(),
            path.display()
        );
        Ok(sentences)
    }

    /// First field of every CSV record
    pub fn read_csv(path: &Path) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let mut sentences = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Malformed CSV record {} in {}", row + 1, path.display()))?;
            if let Some(first) = record.get(0) {
                sentences.push(first.to_string());
            }
        }
        Ok(sentences)
    }

    /// Non-empty lines of a text file
    pub fn read_txt(path: &Path) -> Result<Vec<String>> {
        let content = Self::read_text(path)?;
        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
