//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Use it for scanning:");
        println!(
            "   quanisc scan -r corpus.txt -f txt -p parses.conllu --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Default configuration with comments
    pub fn template() -> &'static str {
        r#"# QuaNISC configuration

[detection]
# Substrings matched case-insensitively against token text
quantifiers = ["every", "some", "no"]
# Token texts that never count as quantifiers ("know" contains "no")
exclusions = ["know"]

[input]
# Input format used when --format is not given: "csv", "txt" or "conllu"
# format = "txt"
# CoNLL-U parses for csv/txt input
# parses = "parses.conllu"

[output]
# "csv" or "json"
default_format = "csv"
# Write output_context next to output
context = true
# Sentences kept before and after each match
context_before = 3
context_after = 1
pretty_json = true

[performance]
parallel = false
# Number of worker threads (0 = auto)
worker_threads = 0
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = CliConfig::from_toml(GenerateConfigArgs::template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_generate_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("quanisc.toml");
        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };

        args.execute().unwrap();
        assert!(output.exists());

        // refuses to overwrite without --force
        assert!(args.execute().is_err());

        let args = GenerateConfigArgs {
            output,
            force: true,
        };
        assert!(args.execute().is_ok());
    }
}
