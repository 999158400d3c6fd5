//! Error types
//!
//! Absence of a grammatical feature (no quantifier, no negation marker, no
//! quantifier root) is never an error; these types only cover malformed
//! parses, unknown sentences, and invalid configuration.

use thiserror::Error;

/// Errors raised by a dependency parser adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The parser has no analysis for this sentence
    #[error("no parse available for sentence: {sentence:?}")]
    UnknownSentence {
        /// The sentence that could not be parsed
        sentence: String,
    },

    /// The parser produced no tokens
    #[error("sentence has no tokens")]
    EmptySentence,

    /// A token points at a head outside the sentence
    #[error("token {index} has head {head} outside the sentence ({len} tokens)")]
    HeadOutOfRange {
        /// Index of the offending token
        index: usize,
        /// The out-of-range head index
        head: usize,
        /// Number of tokens in the sentence
        len: usize,
    },

    /// Token positions do not match their place in the sequence
    #[error("token at position {position} carries index {index}")]
    MisplacedToken {
        /// Position in the token sequence
        position: usize,
        /// Index stored on the token
        index: usize,
    },

    /// Following heads from a token never reaches a root
    #[error("head chain starting at token {index} does not reach a root")]
    Cycle {
        /// Index of the token where the walk started
        index: usize,
    },

    /// A CoNLL-U line could not be read
    #[error("malformed CoNLL-U at line {line}: {reason}")]
    Conllu {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong with the line
        reason: String,
    },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No quantifier substrings were supplied
    #[error("at least one quantifier is required")]
    NoQuantifiers,

    /// An empty string would match every token
    #[error("quantifier at position {0} is empty")]
    EmptyQuantifier(usize),
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    /// Parser adapter error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
