//! Check command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Args;
use quanisc_core::{ConlluParser, Detector, Verdict};
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Sentence to evaluate
    #[arg(value_name = "SENTENCE", required = true)]
    pub sentence: String,

    /// CoNLL-U file containing the sentence's parse
    #[arg(short, long, value_name = "FILE", required = true)]
    pub parses: PathBuf,

    /// Quantifier to search for (repeatable; default: every, some, no)
    #[arg(short, long = "quantifier", value_name = "QUANTIFIER")]
    pub quantifiers: Vec<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, false);

        let verdict = self.verdict()?;
        println!("{}", verdict.is_match());
        log::info!("{}", describe(verdict));
        Ok(())
    }

    /// Evaluate the sentence
    pub fn verdict(&self) -> Result<Verdict> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        if !self.quantifiers.is_empty() {
            config.detection.quantifiers = self.quantifiers.clone();
        }
        let detector_config = config.detector_config()?;

        if !self.parses.exists() {
            return Err(CliError::FileNotFound(self.parses.display().to_string()).into());
        }
        let parser = ConlluParser::from_file(&self.parses)
            .with_context(|| format!("Failed to load parses from {}", self.parses.display()))?;

        let detector = Detector::new(&parser, detector_config.quantifiers);
        let verdict = detector.evaluate(&self.sentence)?;
        Ok(verdict)
    }
}

fn describe(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::NoQuantifier => "no quantifier found",
        Verdict::ScopeNegation => "negation scopes over the quantifier's clause",
        Verdict::AttachedNegation => "negation attaches to the quantifier's head",
        Verdict::NotNegated => "quantifier found without an associated negation",
    }
}
