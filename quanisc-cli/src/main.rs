//! QuaNISC command-line entry point

use clap::Parser;
use quanisc_cli::commands::Commands;

/// Quantifier + negation identification over dependency-parsed sentences
#[derive(Debug, Parser)]
#[command(name = "quanisc", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.command.execute() {
        eprintln!("ERROR: {err:#}");
        eprintln!("**QuaNISC Terminated**");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_arguments() {
        let cli = Cli::try_parse_from([
            "quanisc", "scan", "-r", "corpus.csv", "-f", "csv", "-p", "parses.conllu", "-q",
            "every", "-q", "no", "--no-context",
        ])
        .unwrap();

        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.read.to_str(), Some("corpus.csv"));
                assert_eq!(args.quantifiers, vec!["every", "no"]);
                assert!(args.no_context);
                assert!(!args.quiet);
            }
            other => panic!("expected scan, got {other:?}"),
        }
    }
}
