//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use quanisc_core::{ScanObserver, ScanReport};
use std::sync::OnceLock;
use std::time::Duration;

/// Progress bar for a running scan
///
/// The bar is created lazily when the scan reports its size, so a reporter
/// can be handed to the scanner before the corpus length is known.
pub struct ProgressReporter {
    progress_bar: OnceLock<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: OnceLock::new(),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("Searching... [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} sentences {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl ScanObserver for ProgressReporter {
    fn started(&self, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.enable_steady_tick(Duration::from_millis(100));
        let _ = self.progress_bar.set(pb);
    }

    fn sentence_done(&self) {
        if let Some(pb) = self.progress_bar.get() {
            pb.inc(1);
        }
    }

    fn finished(&self, report: &ScanReport) {
        if let Some(pb) = self.progress_bar.get() {
            pb.finish_with_message(format!("{} matches", report.match_count()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let reporter = ProgressReporter::new(true);
        reporter.started(10);
        reporter.sentence_done();
        reporter.finished(&ScanReport::default());
        assert!(reporter.progress_bar.get().is_none());
    }

    #[test]
    fn test_reporter_counts_sentences() {
        let reporter = ProgressReporter::new(false);
        reporter.started(3);
        reporter.sentence_done();
        reporter.sentence_done();

        let pb = reporter.progress_bar.get().unwrap();
        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.position(), 2);
        reporter.finished(&ScanReport::default());
        assert!(pb.is_finished());
    }
}
