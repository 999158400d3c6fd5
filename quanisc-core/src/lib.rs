//! Quantifier + negation detection over dependency parses
//!
//! This crate flags sentences in which a quantifier ("every", "some", "no")
//! is combined with a negation marker attached to the same clause, such as
//! "everything I've heard him say hasn't been right". It works on dependency
//! parses supplied through the [`DependencyParser`] trait and never parses
//! text on its own.
//!
//! # Example
//!
//! ```rust
//! use quanisc_core::{ConlluParser, DetectorConfig, Scanner};
//!
//! let parses = "# text = Nobody did not come.
//! 1\tNobody\t_\t_\t_\t_\t4\tnsubj\t_\t_
//! 2\tdid\t_\t_\t_\t_\t4\taux\t_\t_
//! 3\tnot\t_\t_\t_\t_\t4\tneg\t_\t_
//! 4\tcome\t_\t_\t_\t_\t0\tROOT\t_\t_
//! 5\t.\t_\t_\t_\t_\t4\tpunct\t_\t_
//! ";
//! let parser = ConlluParser::from_conllu(parses);
//! let scanner = Scanner::new(&parser, &DetectorConfig::default());
//!
//! let report = scanner.scan(&["Nobody did not come."]);
//! assert_eq!(report.indices, vec![0]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod detector;
pub mod error;
pub mod parser;
pub mod quantifier;
pub mod scanner;
pub mod token;

// Re-export key types
pub use config::{ContextWindow, DetectorConfig, DetectorConfigBuilder};
pub use detector::{
    assoc_negation_exists, evaluate, find_quantifier, is_quantifier_negation, quantifier_root,
    reversed_traversal, Detector, Verdict,
};
pub use error::{ConfigError, Error, ParseError, Result};
pub use parser::{ConlluParser, DependencyParser};
pub use quantifier::{QuantifierSet, DEFAULT_EXCLUSIONS, DEFAULT_QUANTIFIERS};
pub use scanner::{
    context, context_entries, context_range, ContextEntry, NoopObserver, ScanFailure,
    ScanObserver, ScanReport, Scanner, CONTEXT_SEPARATOR,
};
pub use token::{DepRole, ParsedSentence, Token};

// Convenience functions

/// Parse one sentence and decide whether it is a quantifier + negation
pub fn detect<P: DependencyParser + ?Sized>(
    parser: &P,
    sentence: &str,
    quantifiers: &QuantifierSet,
) -> std::result::Result<bool, ParseError> {
    let parsed = parser.parse(sentence)?;
    Ok(is_quantifier_negation(&parsed, quantifiers))
}

/// Scan a collection sequentially with the given quantifiers
pub fn scan<P, S>(parser: &P, sentences: &[S], quantifiers: QuantifierSet) -> ScanReport
where
    P: DependencyParser + ?Sized,
    S: AsRef<str> + Sync,
{
    let config = DetectorConfig {
        quantifiers,
        ..DetectorConfig::default()
    };
    Scanner::new(parser, &config).scan(sentences)
}
