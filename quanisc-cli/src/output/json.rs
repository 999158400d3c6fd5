//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs sentences as JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SentenceData {
    /// The sentence text
    pub text: String,
    /// Position in the input, absent for context separators
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index: Option<usize>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_sentence(&mut self, sentence: &str, index: Option<usize>) -> Result<()> {
        self.sentences.push(SentenceData {
            text: sentence.to_string(),
            index,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.sentences)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer, false);
            formatter.write_sentence("Nobody came", Some(4)).unwrap();
            formatter.write_sentence("**********", None).unwrap();
            formatter.finish().unwrap();
        }

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "[{\"text\":\"Nobody came\",\"index\":4},{\"text\":\"**********\"}]\n"
        );

        let parsed: Vec<SentenceData> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0].index, Some(4));
        assert_eq!(parsed[1].index, None);
    }
}
