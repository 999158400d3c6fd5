//! CLI command implementations

use clap::Subcommand;

pub mod check;
pub mod generate_config;
pub mod scan;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a corpus for quantifier + negation statements
    Scan(scan::ScanArgs),

    /// Evaluate a single sentence
    Check(check::CheckArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Scan(args) => args.execute(),
            Commands::Check(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let cmd = Commands::GenerateConfig(generate_config::GenerateConfigArgs {
            output: PathBuf::from("quanisc.toml"),
            force: false,
        });

        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("GenerateConfig"));
        assert!(debug_str.contains("quanisc.toml"));
    }
}
