//! Command-line and environment configuration.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "plantdesk", version, about = "Terminal front-end for the plant layout service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the layout service
    #[arg(long, env = "PLANTDESK_SERVER", default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Request timeout in seconds
    #[arg(long, env = "PLANTDESK_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Directory exported files are written into
    #[arg(long, env = "PLANTDESK_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, short, default_value = "info")]
    pub log_level: String,

    /// Log file used while the terminal UI is running
    #[arg(long, default_value = "plantdesk.log")]
    pub log_file: PathBuf,

    /// Model file to open in the editor
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a model once and print the resulting grid
    Submit {
        model: String,
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the service's sample model
    Sample,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Html,
    Json,
    Csv,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Unknown level names fall back to `info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
