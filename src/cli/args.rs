//! Command line argument parsing for hybrid-rank using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::fusion::ScoreNormalization;

/// hybrid-rank - Hybrid lexical + semantic ranking for retrieval runs
#[derive(Parser, Debug, Clone)]
#[command(name = "hybrid-rank")]
#[command(about = "Fuse lexical and semantic scores into a ranked run file")]
#[command(version = crate::VERSION)]
#[command(long_about = None)]
pub struct HybridRankArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format of the run summary
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Write logs to a dated file in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HybridRankArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank every query of a query set and write the run file
    Run(RunArgs),

    /// Print the effective configuration as JSON
    Config(ConfigArgs),
}

/// Arguments for a ranking run
#[derive(Parser, Debug, Clone, Default)]
pub struct RunArgs {
    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Query set (CSV with QueryID,Query columns)
    #[arg(long, value_name = "QUERIES_FILE")]
    pub queries: Option<PathBuf>,

    /// Run file to write
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Weight of the lexical score (0.0-1.0)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Number of lexical candidates per query
    #[arg(long)]
    pub max_retrieve: Option<usize>,

    /// Number of results written per query (default: 50)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Run tag written in the last column
    #[arg(long)]
    pub run_tag: Option<String>,

    /// Number of worker threads (1 = sequential, 0 = one per CPU)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Score normalization strategy
    #[arg(long)]
    pub normalization: Option<NormalizationArg>,

    /// Keep query ids exactly as read (no "1.0" -> "1" rewrite)
    #[arg(long)]
    pub no_query_id_normalization: bool,

    /// Elasticsearch base URL
    #[arg(long, env = "HYBRID_RANK_ES_HOST")]
    pub es_host: Option<String>,

    /// Elasticsearch index name
    #[arg(long)]
    pub es_index: Option<String>,

    /// Embeddings endpoint URL
    #[arg(long, env = "HYBRID_RANK_EMBEDDING_ENDPOINT")]
    pub embedding_endpoint: Option<String>,

    /// Embedding model name
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for printing the configuration
#[derive(Parser, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file to merge over the defaults
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Normalization strategies selectable on the command line
///
/// Names match the `normalization` values of the configuration file.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationArg {
    /// Min-max scaling to [0, 1]
    #[value(name = "minmax")]
    MinMax,
    /// Z-score mapped to [0, 1]
    #[value(name = "zscore")]
    ZScore,
    /// Rank over distinct values
    Rank,
}

impl From<NormalizationArg> for ScoreNormalization {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::MinMax => ScoreNormalization::MinMax,
            NormalizationArg::ZScore => ScoreNormalization::ZScore,
            NormalizationArg::Rank => ScoreNormalization::Rank,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
