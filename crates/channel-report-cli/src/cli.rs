//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use channel_report::taxonomy::{Granularity, PropertyCategory};

/// channel-report: normalize advertising-channel reports into canonical columns
#[derive(Parser)]
#[command(name = "channel-report")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a channel export into the canonical schema
    Normalize {
        /// Path to the channel export (CSV/TSV)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Channel configuration (JSON, may be a resource stub)
        #[arg(short, long)]
        config: PathBuf,

        /// Granularities to report (default: configured time granularity and every offered entity level)
        #[arg(short, long = "granularity", value_name = "GRANULARITY")]
        granularities: Vec<Granularity>,

        /// Output path (default: <source>_canonical.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// List the native columns a channel offers
    Columns {
        /// Channel configuration (JSON, may be a resource stub)
        #[arg(short, long)]
        config: PathBuf,

        /// Restrict to one granularity
        #[arg(short, long)]
        granularity: Option<Granularity>,

        /// Restrict to one property category (time_metric, entity_attribute, entity_metric)
        #[arg(short = 'C', long)]
        category: Option<PropertyCategory>,
    },

    /// Split identifier strings into labelled fields
    Parse {
        /// Parser configuration (JSON)
        #[arg(short, long)]
        parser: PathBuf,

        /// Identifier strings to parse
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
