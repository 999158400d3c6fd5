//! Input handling module

pub mod file_reader;

pub use file_reader::{FileReader, InputFormat};
