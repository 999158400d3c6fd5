//! QuaNISC CLI library
//!
//! This library provides the command-line interface for quantifier +
//! negation identification over dependency-parsed corpora.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
