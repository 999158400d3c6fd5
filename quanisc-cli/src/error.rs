//! Error handling for the CLI application

use std::fmt;

/// Input and configuration problems detected before a scan starts
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// No input format given on the command line or in the config file
    MissingFormat,
    /// Input format not recognised
    UnsupportedFormat(String),
    /// Plain-text or CSV input without a CoNLL-U parse file
    MissingParses,
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::MissingFormat => {
                write!(f, "Please specify the file format (csv, txt or conllu)")
            }
            CliError::UnsupportedFormat(format) => write!(
                f,
                "Unsupported file format: {format} (expected csv, txt or conllu)"
            ),
            CliError::MissingParses => write!(
                f,
                "csv and txt input need dependency parses: pass --parses <FILE.conllu>"
            ),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("corpus.csv".to_string());
        assert_eq!(error.to_string(), "File not found: corpus.csv");
    }

    #[test]
    fn test_format_errors_display() {
        assert!(CliError::MissingFormat
            .to_string()
            .starts_with("Please specify the file format"));
        assert_eq!(
            CliError::UnsupportedFormat("xml".to_string()).to_string(),
            "Unsupported file format: xml (expected csv, txt or conllu)"
        );
    }

    #[test]
    fn test_missing_parses_display() {
        assert!(CliError::MissingParses.to_string().contains("--parses"));
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("at least one quantifier is required".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: at least one quantifier is required"
        );
    }

    #[test]
    fn test_error_downcast_through_anyhow() {
        let result: CliResult<()> = Err(CliError::MissingParses.into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingParses)
        ));
    }
}
