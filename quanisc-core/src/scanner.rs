//! Batch scanning over a sentence collection

use crate::config::{ContextWindow, DetectorConfig};
use crate::detector::Detector;
use crate::error::ParseError;
use crate::parser::DependencyParser;
use std::ops::Range;

/// Record written after every context window
pub const CONTEXT_SEPARATOR: &str = "**********";

/// Receives progress notifications while a scan runs
///
/// Callbacks may arrive from worker threads when scanning in parallel.
pub trait ScanObserver: Sync {
    /// Called once before the first sentence
    fn started(&self, _total: usize) {}

    /// Called after each sentence, in completion order
    fn sentence_done(&self) {}

    /// Called once after the last sentence
    fn finished(&self, _report: &ScanReport) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// A sentence the parser could not handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    /// Index of the sentence in the input
    pub index: usize,
    /// Parser error
    pub error: ParseError,
}

/// Result of scanning a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matching sentences in input order
    pub matches: Vec<String>,
    /// Input indices of the matches
    pub indices: Vec<usize>,
    /// Sentences skipped because parsing failed
    pub failures: Vec<ScanFailure>,
    /// Number of sentences scanned
    pub total: usize,
}

impl ScanReport {
    /// Number of matches
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Context windows around each match, see [`context`]
    pub fn context<S: AsRef<str>>(&self, sentences: &[S], window: ContextWindow) -> Vec<String> {
        context(sentences, &self.indices, window)
    }

    /// Context windows around each match with input indices, see
    /// [`context_entries`]
    pub fn context_entries<'a, S: AsRef<str> + 'a>(
        &'a self,
        sentences: &'a [S],
        window: ContextWindow,
    ) -> impl Iterator<Item = ContextEntry<'a>> + 'a {
        context_entries(sentences, &self.indices, window)
    }

    fn record(&mut self, index: usize, sentence: &str, outcome: Result<bool, ParseError>) {
        match outcome {
            Ok(true) => {
                self.matches.push(sentence.to_string());
                self.indices.push(index);
            }
            Ok(false) => {}
            Err(error) => {
                log::warn!("skipping sentence {index}: {error}");
                self.failures.push(ScanFailure { index, error });
            }
        }
    }
}

/// Index range of the window around `index` in a collection of `len`
pub fn context_range(index: usize, len: usize, window: ContextWindow) -> Range<usize> {
    let start = index.saturating_sub(window.preceding);
    let end = index
        .saturating_add(window.following)
        .saturating_add(1)
        .min(len);
    start.min(end)..end
}

/// One record of a context listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEntry<'a> {
    /// A sentence inside a window
    Sentence {
        /// Position in the input
        index: usize,
        /// Sentence text
        text: &'a str,
    },
    /// End of a window
    Separator,
}

impl<'a> ContextEntry<'a> {
    /// Text to write; [`CONTEXT_SEPARATOR`] for a separator
    pub fn text(&self) -> &'a str {
        match self {
            ContextEntry::Sentence { text, .. } => *text,
            ContextEntry::Separator => CONTEXT_SEPARATOR,
        }
    }

    /// Input position, absent for a separator
    pub fn index(&self) -> Option<usize> {
        match self {
            ContextEntry::Sentence { index, .. } => Some(*index),
            ContextEntry::Separator => None,
        }
    }
}

/// Window around each match followed by a separator
///
/// Overlapping windows are emitted in full for every match.
pub fn context_entries<'a, S: AsRef<str> + 'a>(
    sentences: &'a [S],
    indices: &'a [usize],
    window: ContextWindow,
) -> impl Iterator<Item = ContextEntry<'a>> + 'a {
    indices.iter().flat_map(move |&index| {
        context_range(index, sentences.len(), window)
            .map(move |i| ContextEntry::Sentence {
                index: i,
                text: sentences[i].as_ref(),
            })
            .chain(std::iter::once(ContextEntry::Separator))
    })
}

/// Sentences surrounding each match, each window followed by
/// [`CONTEXT_SEPARATOR`]
pub fn context<S: AsRef<str>>(
    sentences: &[S],
    indices: &[usize],
    window: ContextWindow,
) -> Vec<String> {
    context_entries(sentences, indices, window)
        .map(|entry| entry.text().to_string())
        .collect()
}

/// Applies a [`Detector`] to every sentence of a collection
pub struct Scanner<'p, P: DependencyParser + ?Sized> {
    detector: Detector<'p, P>,
    parallel: bool,
}

impl<'p, P: DependencyParser + ?Sized> Scanner<'p, P> {
    /// Create a scanner from a parser and configuration
    pub fn new(parser: &'p P, config: &DetectorConfig) -> Self {
        Self {
            detector: Detector::new(parser, config.quantifiers.clone()),
            parallel: config.parallel,
        }
    }

    /// The detector applied to each sentence
    pub fn detector(&self) -> &Detector<'p, P> {
        &self.detector
    }

    /// Scan without progress reporting
    pub fn scan<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> ScanReport {
        self.scan_with_observer(sentences, &NoopObserver)
    }

    /// Scan and report progress to `observer`
    ///
    /// Sentences that fail to parse are skipped and listed in
    /// [`ScanReport::failures`]; matches keep input order in every mode.
    pub fn scan_with_observer<S, O>(&self, sentences: &[S], observer: &O) -> ScanReport
    where
        S: AsRef<str> + Sync,
        O: ScanObserver + ?Sized,
    {
        log::info!(
            "Beginning search for quantifier + negation statements in {} sentences",
            sentences.len()
        );
        observer.started(sentences.len());

        let outcomes = self.evaluate_all(sentences, observer);

        let mut report = ScanReport {
            total: sentences.len(),
            ..ScanReport::default()
        };
        for (index, outcome) in outcomes.into_iter().enumerate() {
            report.record(index, sentences[index].as_ref(), outcome);
        }

        log::info!(
            "Search completed with {} potential quantifier + negations ({} skipped)",
            report.match_count(),
            report.failures.len()
        );
        observer.finished(&report);
        report
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all<S, O>(&self, sentences: &[S], observer: &O) -> Vec<Result<bool, ParseError>>
    where
        S: AsRef<str> + Sync,
        O: ScanObserver + ?Sized,
    {
        use rayon::prelude::*;

        if self.parallel {
            log::debug!(
                "evaluating on {} worker threads",
                rayon::current_num_threads()
            );
            return sentences
                .par_iter()
                .map(|sentence| {
                    let outcome = self.detector.detect(sentence.as_ref());
                    observer.sentence_done();
                    outcome
                })
                .collect();
        }

        self.evaluate_sequential(sentences, observer)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all<S, O>(&self, sentences: &[S], observer: &O) -> Vec<Result<bool, ParseError>>
    where
        S: AsRef<str> + Sync,
        O: ScanObserver + ?Sized,
    {
        if self.parallel {
            log::warn!("parallel scanning requested but the `parallel` feature is disabled");
        }
        self.evaluate_sequential(sentences, observer)
    }

    fn evaluate_sequential<S, O>(
        &self,
        sentences: &[S],
        observer: &O,
    ) -> Vec<Result<bool, ParseError>>
    where
        S: AsRef<str>,
        O: ScanObserver + ?Sized,
    {
        sentences
            .iter()
            .map(|sentence| {
                let outcome = self.detector.detect(sentence.as_ref());
                observer.sentence_done();
                outcome
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("s{i}")).collect()
    }

    #[test]
    fn test_context_range_middle() {
        assert_eq!(context_range(5, 10, ContextWindow::default()), 2..7);
    }

    #[test]
    fn test_context_range_clamps() {
        let window = ContextWindow::default();
        assert_eq!(context_range(0, 10, window), 0..2);
        assert_eq!(context_range(9, 10, window), 6..10);
        assert_eq!(context_range(0, 1, window), 0..1);
        assert_eq!(context_range(1, 2, window), 0..2);
    }

    #[test]
    fn test_context_output() {
        let sentences = sentences(6);
        let out = context(&sentences, &[0, 5], ContextWindow::default());
        assert_eq!(
            out,
            vec![
                "s0",
                "s1",
                CONTEXT_SEPARATOR,
                "s2",
                "s3",
                "s4",
                "s5",
                CONTEXT_SEPARATOR
            ]
        );
    }

    #[test]
    fn test_context_empty_indices() {
        let sentences = sentences(3);
        assert!(context(&sentences, &[], ContextWindow::default()).is_empty());
    }

    #[test]
    fn test_context_entries_carry_indices() {
        let sentences = sentences(4);
        let report = ScanReport {
            indices: vec![3],
            ..ScanReport::default()
        };
        let entries: Vec<_> = report
            .context_entries(&sentences, ContextWindow::default())
            .map(|e| (e.text(), e.index()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("s0", Some(0)),
                ("s1", Some(1)),
                ("s2", Some(2)),
                ("s3", Some(3)),
                (CONTEXT_SEPARATOR, None)
            ]
        );
    }

    #[test]
    fn test_context_custom_window() {
        let sentences = sentences(5);
        let window = ContextWindow {
            preceding: 0,
            following: 0,
        };
        assert_eq!(context(&sentences, &[2], window), vec!["s2", CONTEXT_SEPARATOR]);
    }
}
