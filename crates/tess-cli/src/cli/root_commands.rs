use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use tess_config::InlineMode;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Infer a schema from an example JSON value.
    Sketch(SketchArgs),
    /// Inline references of a schema bundle.
    Inline(InlineArgs),
    /// Print the built-in schemas of leaf types.
    Catalog,
}

#[derive(Clone, Debug, Args)]
pub struct SketchArgs {
    /// JSON file to read (stdin when omitted).
    pub file: Option<PathBuf>,

    /// Pin exact lengths, bounds, and values.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct InlineArgs {
    /// Bundle file to read (stdin when omitted).
    pub file: Option<PathBuf>,

    /// Which references to inline (defaults to `output.inline` from config).
    #[arg(short, long)]
    pub mode: Option<InlineModeArg>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum InlineModeArg {
    None,
    NonRecursive,
    All,
}

impl From<InlineModeArg> for InlineMode {
    fn from(mode: InlineModeArg) -> Self {
        match mode {
            InlineModeArg::None => Self::None,
            InlineModeArg::NonRecursive => Self::NonRecursive,
            InlineModeArg::All => Self::All,
        }
    }
}
