//! Dependency parser adapters
//!
//! The detector never parses text itself. It asks a [`DependencyParser`] for a
//! [`ParsedSentence`]. [`ConlluParser`] serves analyses produced ahead of time
//! by an external parser and exported as CoNLL-U.

use crate::error::{ParseError, Result};
use crate::token::{ParsedSentence, Token};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Source of dependency parses
///
/// Implementations must be safe to share between threads so a scan can fan
/// sentences out over a worker pool.
pub trait DependencyParser: Send + Sync {
    /// Parse one sentence
    fn parse(&self, sentence: &str) -> std::result::Result<ParsedSentence, ParseError>;
}

impl<P: DependencyParser + ?Sized> DependencyParser for &P {
    fn parse(&self, sentence: &str) -> std::result::Result<ParsedSentence, ParseError> {
        (**self).parse(sentence)
    }
}

impl<P: DependencyParser + ?Sized> DependencyParser for Box<P> {
    fn parse(&self, sentence: &str) -> std::result::Result<ParsedSentence, ParseError> {
        (**self).parse(sentence)
    }
}

/// Parser backed by pre-computed CoNLL-U analyses
///
/// Sentences are looked up by their text: the `# text = ...` comment when
/// present, otherwise the word forms joined by single spaces. A record whose
/// tree is malformed stays in the corpus; looking it up returns the error.
#[derive(Debug, Default, Clone)]
pub struct ConlluParser {
    parses: HashMap<String, std::result::Result<ParsedSentence, ParseError>>,
    order: Vec<String>,
}

impl ConlluParser {
    /// Read CoNLL-U from a string
    pub fn from_conllu(input: &str) -> Self {
        let mut parser = Self::default();
        for (text, parsed) in ConlluReader::new(input.as_bytes()) {
            parser.insert(text, parsed);
        }
        parser
    }

    /// Read CoNLL-U from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut parser = Self::default();
        let mut records = ConlluReader::new(reader);
        for (text, parsed) in records.by_ref() {
            parser.insert(text, parsed);
        }
        if let Some(err) = records.take_io_error() {
            return Err(err.into());
        }
        Ok(parser)
    }

    /// Read CoNLL-U from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let parser = Self::from_reader(file)?;
        log::info!(
            "Loaded {} parsed sentences from {}",
            parser.len(),
            path.display()
        );
        Ok(parser)
    }

    fn insert(&mut self, text: String, parsed: std::result::Result<ParsedSentence, ParseError>) {
        if let Err(err) = &parsed {
            log::debug!("unusable parse for {:?}: {}", text, err);
        }
        self.order.push(text.clone());
        match self.parses.entry(text) {
            Entry::Occupied(entry) => {
                log::debug!("duplicate parse for {:?}; keeping the first", entry.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(parsed);
            }
        }
    }

    /// Number of sentence records, repeated texts included
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the file held no sentence
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Text of every record in file order
    pub fn sentences(&self) -> &[String] {
        &self.order
    }
}

impl DependencyParser for ConlluParser {
    fn parse(&self, sentence: &str) -> std::result::Result<ParsedSentence, ParseError> {
        match self.parses.get(sentence.trim()) {
            Some(parsed) => parsed.clone(),
            None => Err(ParseError::UnknownSentence {
                sentence: sentence.to_string(),
            }),
        }
    }
}

type Record = (String, std::result::Result<ParsedSentence, ParseError>);

/// Lines of one sentence collected so far
#[derive(Default)]
struct Block {
    text: Option<String>,
    forms: Vec<String>,
    tokens: Vec<Token>,
    error: Option<ParseError>,
}

impl Block {
    fn is_empty(&self) -> bool {
        self.forms.is_empty() && self.error.is_none()
    }

    fn finish(self) -> Record {
        let text = self.text.unwrap_or_else(|| self.forms.join(" "));
        let parsed = match self.error {
            Some(err) => Err(err),
            None => ParsedSentence::new(self.tokens),
        };
        (text.trim().to_string(), parsed)
    }
}

/// Streaming CoNLL-U sentence reader
///
/// Yields one record per sentence block. Only I/O failures end the stream.
struct ConlluReader<R> {
    lines: std::io::Lines<BufReader<R>>,
    line_no: usize,
    io_error: Option<std::io::Error>,
    done: bool,
}

impl<R: Read> ConlluReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line_no: 0,
            io_error: None,
            done: false,
        }
    }

    fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.io_error.take()
    }

    fn token(&self, columns: &[&str], expected: usize) -> std::result::Result<Token, ParseError> {
        if columns.len() < 8 {
            return Err(self.malformed(format!(
                "expected 10 tab-separated columns, found {}",
                columns.len()
            )));
        }

        let id = columns[0];
        let id: usize = id
            .parse()
            .map_err(|_| self.malformed(format!("invalid token id {id:?}")))?;
        if id != expected + 1 {
            return Err(self.malformed(format!("expected token id {}, found {id}", expected + 1)));
        }

        let head: usize = columns[6]
            .parse()
            .map_err(|_| self.malformed(format!("invalid head {:?}", columns[6])))?;
        let index = id - 1;
        let head = if head == 0 { index } else { head - 1 };

        Ok(Token::new(index, columns[1], columns[7], head))
    }

    fn malformed(&self, reason: String) -> ParseError {
        ParseError::Conllu {
            line: self.line_no,
            reason,
        }
    }
}

impl<R: Read> Iterator for ConlluReader<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut block = Block::default();

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    self.io_error = Some(err);
                    self.done = true;
                    return None;
                }
                None => {
                    self.done = true;
                    if block.is_empty() {
                        return None;
                    }
                    return Some(block.finish());
                }
            };
            self.line_no += 1;

            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if block.is_empty() {
                    block = Block::default();
                    continue;
                }
                return Some(block.finish());
            }

            if let Some(comment) = line.strip_prefix('#') {
                if let Some(value) = comment.trim_start().strip_prefix("text") {
                    if let Some(value) = value.trim_start().strip_prefix('=') {
                        block.text = Some(value.trim().to_string());
                    }
                }
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            // multiword ranges and empty nodes carry no head
            if columns[0].contains('-') || columns[0].contains('.') {
                continue;
            }
            if let Some(form) = columns.get(1) {
                block.forms.push(form.to_string());
            }
            // the rest of a broken sentence only contributes its forms
            if block.error.is_some() {
                continue;
            }

            match self.token(&columns, block.tokens.len()) {
                Ok(token) => block.tokens.push(token),
                Err(err) => block.error = Some(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::DepRole;

    const SAMPLE: &str = "# sent_id = 1
# text = Nobody came.
1\tNobody\tnobody\tPRON\tNN\t_\t2\tnsubj\t_\t_
2\tcame\tcome\tVERB\tVBD\t_\t0\tROOT\t_\t_
3\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_

# sent_id = 2
1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_
1\tdo\tdo\tAUX\tVBP\t_\t3\taux\t_\t_
2\tn't\tnot\tPART\tRB\t_\t3\tneg\t_\t_
3\tgo\tgo\tVERB\tVB\t_\t0\tROOT\t_\t_
";

    #[test]
    fn test_reads_sentences_in_order() {
        let parser = ConlluParser::from_conllu(SAMPLE);
        assert_eq!(parser.len(), 2);
        assert_eq!(parser.sentences(), &["Nobody came.", "do n't go"]);
    }

    #[test]
    fn test_parse_by_text() {
        let parser = ConlluParser::from_conllu(SAMPLE);
        let sentence = parser.parse("  Nobody came. ").unwrap();
        assert_eq!(sentence.len(), 3);

        let came = sentence.get(1).unwrap();
        assert_eq!(came.role, DepRole::Root);
        assert!(came.is_root());
        assert_eq!(sentence.get(0).unwrap().head, 1);
    }

    #[test]
    fn test_multiword_range_skipped() {
        let parser = ConlluParser::from_conllu(SAMPLE);
        let sentence = parser.parse("do n't go").unwrap();
        assert_eq!(sentence.len(), 3);
        assert_eq!(sentence.get(1).unwrap().role, DepRole::Negation);
    }

    #[test]
    fn test_unknown_sentence() {
        let parser = ConlluParser::from_conllu(SAMPLE);
        assert_eq!(
            parser.parse("Somebody came."),
            Err(ParseError::UnknownSentence {
                sentence: "Somebody came.".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_line() {
        let parser = ConlluParser::from_conllu("1\tword\tROOT\n");
        assert_eq!(parser.sentences(), &["word"]);
        assert!(matches!(
            parser.parse("word"),
            Err(ParseError::Conllu { line: 1, .. })
        ));

        let parser = ConlluParser::from_conllu("1\ta\t_\t_\t_\t_\tx\tROOT\t_\t_\n");
        let err = parser.parse("a").unwrap_err();
        assert!(err.to_string().contains("invalid head"));
    }

    #[test]
    fn test_out_of_order_ids() {
        let input = "1\ta\t_\t_\t_\t_\t0\tROOT\t_\t_\n3\tb\t_\t_\t_\t_\t1\tdep\t_\t_\n";
        let parser = ConlluParser::from_conllu(input);
        assert_eq!(parser.sentences(), &["a b"]);
        assert!(matches!(
            parser.parse("a b"),
            Err(ParseError::Conllu { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_tree_keeps_other_sentences() {
        let input = "# text = Nobody came.
1\tNobody\t_\t_\t_\t_\t2\tnsubj\t_\t_
2\tcame\t_\t_\t_\t_\t0\tROOT\t_\t_

# text = Round and round.
1\tRound\t_\t_\t_\t_\t2\tdep\t_\t_
2\tround\t_\t_\t_\t_\t1\tdep\t_\t_

# text = Still here.
1\tStill\t_\t_\t_\t_\t2\tadvmod\t_\t_
2\there\t_\t_\t_\t_\t0\tROOT\t_\t_
";
        let parser = ConlluParser::from_conllu(input);
        assert_eq!(
            parser.sentences(),
            &["Nobody came.", "Round and round.", "Still here."]
        );
        assert_eq!(parser.parse("Nobody came.").unwrap().len(), 2);
        assert_eq!(
            parser.parse("Round and round."),
            Err(ParseError::Cycle { index: 0 })
        );
        assert!(parser.parse("Still here.").is_ok());
    }

    #[test]
    fn test_repeated_text_keeps_every_record() {
        let input = "# text = go\n1\tgo\t_\t_\t_\t_\t0\tROOT\t_\t_\n\n# text = stop\n1\tstop\t_\t_\t_\t_\t0\tROOT\t_\t_\n\n# text = go\n1\tgo\t_\t_\t_\t_\t0\tdep\t_\t_\n";
        let parser = ConlluParser::from_conllu(input);
        assert_eq!(parser.len(), 3);
        assert_eq!(parser.sentences(), &["go", "stop", "go"]);
        // lookups use the first analysis
        assert_eq!(parser.parse("go").unwrap().get(0).unwrap().role, DepRole::Root);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parses.conllu");
        std::fs::write(&path, SAMPLE).unwrap();

        let parser = ConlluParser::from_file(&path).unwrap();
        assert_eq!(parser.len(), 2);

        let missing = ConlluParser::from_file(&dir.path().join("missing.conllu"));
        assert!(matches!(missing, Err(crate::error::Error::Io(_))));
    }
}
