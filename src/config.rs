use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;
use crate::DEFAULT_BASE_URL;

/// What to do when one leader or one country cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failure.
    #[default]
    FailFast,
    /// Record a null biography for the leader (or skip the country), log why and go on.
    BestEffort,
}

#[derive(Parser, Debug)]
#[command(name = "leaders_scrap", version, about = "Scrape country leaders and save them to JSON or CSV")]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Output file, defaults to `leaders.<format>` in the working directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Root of the country leaders API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Keep going when a leader page or a country cannot be fetched
    #[arg(long, default_value_t = false)]
    pub best_effort: bool,
}

/// Settings for one run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub format: OutputFormat,
    pub output: PathBuf,
    pub policy: FailurePolicy,
}

impl Config {
    pub fn new(base_url: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            base_url: base_url.into(),
            format,
            output: PathBuf::from(format.default_file_name()),
            policy: FailurePolicy::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, OutputFormat::default())
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let output = cli
            .output
            .unwrap_or_else(|| PathBuf::from(cli.format.default_file_name()));
        let policy = if cli.best_effort {
            FailurePolicy::BestEffort
        } else {
            FailurePolicy::FailFast
        };
        Self {
            base_url: cli.base_url,
            format: cli.format,
            output,
            policy,
        }
    }
}
