//! Command line argument parsing for the diachron CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::config::CorpusConfig;
use crate::error::{DiachronError, Result};
use crate::ingest::{IngestConfig, IngestMode};

/// diachron - lemma statistics over a Latin corpus, filtered by author and period
#[derive(Parser, Debug, Clone)]
#[command(name = "diachron")]
#[command(about = "Lemma statistics over a Latin corpus, filtered by author and period")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct DiachronArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "json", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl DiachronArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity: warnings by default, pipeline
    /// phases with `-vv`, per-file detail from `-vvv` on.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Where the corpus lives and how to load it.
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// JSON configuration file; flags below override its values
    #[arg(short, long, value_name = "CONFIG_FILE", env = "DIACHRON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Corpus root, one directory per author
    #[arg(short, long, value_name = "DIR", env = "DIACHRON_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// CSV lemma dictionary
    #[arg(short, long, value_name = "CSV_FILE", env = "DIACHRON_LEMMAS", global = true)]
    pub lemmas: Option<PathBuf>,

    /// Author reference file (`Name # (span)` per line)
    #[arg(short, long, value_name = "FILE", env = "DIACHRON_AUTHORS", global = true)]
    pub authors: Option<PathBuf>,

    /// Ingestion strategy
    #[arg(short, long, global = true)]
    pub mode: Option<ModeArg>,

    /// Number of ingestion threads (default: number of CPUs)
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,
}

impl CorpusArgs {
    /// Merge the optional config file with the command line flags.
    pub fn to_config(&self) -> Result<CorpusConfig> {
        let mut config = match &self.config {
            Some(path) => CorpusConfig::from_path(path)?,
            None => {
                let data_dir = self.data_dir.clone().ok_or_else(|| {
                    DiachronError::invalid_config("--data-dir is required without --config")
                })?;
                let lemmas = self.lemmas.clone().ok_or_else(|| {
                    DiachronError::invalid_config("--lemmas is required without --config")
                })?;
                CorpusConfig::new(data_dir, lemmas)
            }
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(lemmas) = &self.lemmas {
            config.lemmas = lemmas.clone();
        }
        if let Some(authors) = &self.authors {
            config.authors = Some(authors.clone());
        }

        let mut ingest: IngestConfig = config.ingest.clone();
        if let Some(mode) = self.mode {
            ingest = ingest.with_mode(mode.into());
        }
        if let Some(threads) = self.threads {
            ingest = ingest.with_threads(threads);
        }
        Ok(config.with_ingest(ingest))
    }
}

/// Per-request author restriction.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Comma-separated author names
    #[arg(long = "authors-filter", value_name = "NAMES", global = true)]
    pub authors_filter: Option<String>,

    /// Keep only authors whose span starts before this date (e.g. `1d`, `3a`)
    #[arg(long, value_name = "DATE", global = true)]
    pub date: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show corpus statistics
    Stats,

    /// Count the occurrences of a lemma, by form
    Lemma(WordArgs),

    /// Count the occurrences of a surface form
    Form(WordArgs),

    /// List the lines where a lemma occurs
    #[command(name = "occurrences-lemma")]
    OccurrencesLemma(WordArgs),

    /// List the lines where a form occurs
    #[command(name = "occurrences-form")]
    OccurrencesForm(WordArgs),

    /// Lemmas used by all of the given authors and by nobody else
    Intersection(IntersectionArgs),

    /// List forms attested under more than one lemma
    Ambiguous,
}

#[derive(Args, Debug, Clone)]
pub struct WordArgs {
    #[arg(value_name = "WORD")]
    pub word: String,
}

#[derive(Args, Debug, Clone)]
pub struct IntersectionArgs {
    /// Comma-separated author names
    #[arg(value_name = "AUTHORS", value_delimiter = ',', required = true)]
    pub targets: Vec<String>,
}

/// Ingestion modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    /// Channel into a single aggregator thread
    Aggregator,
    /// Per-file partial indices merged at the end
    Sharded,
}

impl From<ModeArg> for IngestMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Aggregator => IngestMode::Aggregator,
            ModeArg::Sharded => IngestMode::Sharded,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}
