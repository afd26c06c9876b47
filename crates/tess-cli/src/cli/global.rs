use std::path::PathBuf;

use clap::ValueEnum;
use tess_config::OutputConfig;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl GlobalFlags {
    /// Apply output settings from configuration. `pretty = false` turns
    /// JSON output into single-line output.
    #[must_use]
    pub fn with_output_config(mut self, output: &OutputConfig) -> Self {
        if !output.pretty && self.format == OutputFormat::Json {
            self.format = OutputFormat::Raw;
        }
        self
    }
}
