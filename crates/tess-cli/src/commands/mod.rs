use tess_config::TesseraConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod catalog;
pub mod inline;
pub mod sketch;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &TesseraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Sketch(args) => sketch::handle(args, flags),
        Commands::Inline(args) => inline::handle(args, config, flags),
        Commands::Catalog => catalog::handle(flags),
    }
}
