use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tsr` binary.
#[derive(Debug, Parser)]
#[command(name = "tsr", version, about = "Tessera - structural JSON schema toolbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered above the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use tess_config::{InlineMode, OutputConfig};

    use super::root_commands::InlineModeArg;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["tsr", "--format", "raw", "--verbose", "catalog"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Catalog));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tsr", "catalog", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tsr", "--format", "table", "catalog"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn sketch_takes_optional_file_and_strict_flag() {
        let cli = Cli::try_parse_from(["tsr", "sketch", "value.json", "--strict"])
            .expect("cli should parse");
        let Commands::Sketch(args) = cli.command else {
            panic!("expected sketch");
        };
        assert_eq!(args.file.as_deref(), Some(std::path::Path::new("value.json")));
        assert!(args.strict);

        let cli = Cli::try_parse_from(["tsr", "sketch"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Sketch(ref args) if args.file.is_none() && !args.strict));
    }

    #[test]
    fn inline_mode_uses_kebab_case_values() {
        let cli = Cli::try_parse_from(["tsr", "inline", "--mode", "non-recursive"])
            .expect("cli should parse");
        let Commands::Inline(args) = cli.command else {
            panic!("expected inline");
        };
        assert_eq!(args.mode, Some(InlineModeArg::NonRecursive));
        assert_eq!(InlineMode::from(InlineModeArg::NonRecursive), InlineMode::NonRecursive);
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["tsr", "--config", "/tmp/tessera.toml", "catalog"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(
            flags.config.as_deref(),
            Some(std::path::Path::new("/tmp/tessera.toml"))
        );
    }

    #[test]
    fn compact_output_config_downgrades_json_to_raw() {
        let cli = Cli::try_parse_from(["tsr", "catalog"]).expect("cli should parse");
        let compact = OutputConfig {
            pretty: false,
            ..OutputConfig::default()
        };
        assert_eq!(
            cli.global_flags().with_output_config(&compact).format,
            OutputFormat::Raw
        );
        assert_eq!(
            cli.global_flags()
                .with_output_config(&OutputConfig::default())
                .format,
            OutputFormat::Json
        );
    }
}
