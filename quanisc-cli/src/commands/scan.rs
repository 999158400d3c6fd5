//! Scan command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{FileReader, InputFormat};
use crate::output::{CsvFormatter, JsonFormatter, OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use quanisc_core::{ConlluParser, ScanReport, Scanner};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// File to read sentences from
    #[arg(short, long, value_name = "FILE", required = true)]
    pub read: PathBuf,

    /// Input file format
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,

    /// CoNLL-U parses for csv/txt input
    #[arg(short, long, value_name = "FILE")]
    pub parses: Option<PathBuf>,

    /// Quantifier to search for (repeatable; default: every, some, no)
    #[arg(short, long = "quantifier", value_name = "QUANTIFIER")]
    pub quantifiers: Vec<String>,

    /// Directory for output files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Skip the context output file
    #[arg(long)]
    pub no_context: bool,

    /// Evaluate sentences in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads for parallel evaluation
    #[arg(short = 't', long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Paths of the files a scan wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutputs {
    /// Matched sentences
    pub matches: PathBuf,
    /// Context windows, when enabled
    pub context: Option<PathBuf>,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::debug!("Arguments: {:?}", self);

        let (report, outputs) = self.run()?;

        println!(
            "Found {} potential quantifier + negation statements in {} sentences.",
            report.match_count(),
            report.total
        );
        if !report.failures.is_empty() {
            println!("Skipped {} sentences without a parse.", report.failures.len());
        }
        println!("Matches written to {}", outputs.matches.display());
        if let Some(context) = &outputs.context {
            println!("Context written to {}", context.display());
        }

        Ok(())
    }

    /// Run the scan and write its outputs
    pub fn run(&self) -> Result<(ScanReport, ScanOutputs)> {
        let config = self.resolve_config()?;

        if !self.read.exists() {
            return Err(CliError::FileNotFound(self.read.display().to_string()).into());
        }

        let format = self.input_format(&config)?;
        let output_format = self.output_format(&config)?;
        let (parser, sentences) = self.load(format, &config)?;

        let detector_config = config.detector_config()?;
        log::info!(
            "Identifying potential quantifier + negation statements for: {}",
            detector_config.quantifiers.quantifiers().join(", ")
        );

        let threads = self.threads.unwrap_or(config.performance.worker_threads);
        if detector_config.parallel && threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .unwrap_or_else(|e| log::warn!("Failed to configure worker threads: {e}"));
        }
        if detector_config.parallel {
            log::info!(
                "Parallel evaluation enabled ({} CPUs available)",
                num_cpus::get()
            );
        }

        let scanner = Scanner::new(&parser, &detector_config);
        let progress = ProgressReporter::new(self.quiet);
        let report = scanner.scan_with_observer(&sentences, &progress);

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let matches_path = self
            .output_dir
            .join(format!("output.{}", output_format.extension()));
        log::info!(
            "Writing potential quantifier + negation statements to {}",
            matches_path.display()
        );
        let records = report
            .matches
            .iter()
            .zip(&report.indices)
            .map(|(sentence, &index)| (sentence.as_str(), Some(index)));
        write_records(&matches_path, output_format, config.output.pretty_json, records)?;

        let context_path = match detector_config.context {
            Some(window) => {
                let path = self
                    .output_dir
                    .join(format!("output_context.{}", output_format.extension()));
                log::info!(
                    "Writing potential quantifier + negation statements with context to {}",
                    path.display()
                );
                let records = report
                    .context_entries(&sentences, window)
                    .map(|entry| (entry.text(), entry.index()));
                write_records(&path, output_format, config.output.pretty_json, records)?;
                Some(path)
            }
            None => None,
        };

        Ok((
            report,
            ScanOutputs {
                matches: matches_path,
                context: context_path,
            },
        ))
    }

    /// Configuration file merged with command-line overrides
    fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;

        if !self.quantifiers.is_empty() {
            config.detection.quantifiers = self.quantifiers.clone();
        }
        if self.no_context {
            config.output.context = false;
        }
        if self.parallel {
            config.performance.parallel = true;
        }
        if let Some(parses) = &self.parses {
            config.input.parses = Some(parses.clone());
        }

        Ok(config)
    }

    fn input_format(&self, config: &CliConfig) -> Result<InputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match &config.input.format {
            Some(name) => Ok(name.parse::<InputFormat>()?),
            None => Err(CliError::MissingFormat.into()),
        }
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.output_format {
            return Ok(format);
        }
        OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
            CliError::ConfigError(format!(
                "unknown output format: {}",
                config.output.default_format
            ))
            .into()
        })
    }

    /// Build the parse adapter and read the sentences
    fn load(&self, format: InputFormat, config: &CliConfig) -> Result<(ConlluParser, Vec<String>)> {
        if format == InputFormat::Conllu {
            let parser = ConlluParser::from_file(&self.read)
                .with_context(|| format!("Failed to load parses from {}", self.read.display()))?;
            let sentences = parser.sentences().to_vec();
            return Ok((parser, sentences));
        }

        let parses = config.input.parses.as_ref().ok_or(CliError::MissingParses)?;
        if !parses.exists() {
            return Err(CliError::FileNotFound(parses.display().to_string()).into());
        }
        let parser = ConlluParser::from_file(parses)
            .with_context(|| format!("Failed to load parses from {}", parses.display()))?;
        let sentences = FileReader::read_sentences(&self.read, format)?;
        Ok((parser, sentences))
    }
}

fn write_records<'a, I>(path: &Path, format: OutputFormat, pretty: bool, records: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, Option<usize>)>,
{
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    let mut formatter: Box<dyn OutputFormatter> = match format {
        OutputFormat::Csv => Box::new(CsvFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty)),
    };

    for (sentence, index) in records {
        formatter.write_sentence(sentence, index)?;
    }
    formatter.finish()
}
