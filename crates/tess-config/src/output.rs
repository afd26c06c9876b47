//! Output options for rendered schema bundles.

use serde::{Deserialize, Serialize};

const fn default_pretty() -> bool {
    true
}

/// Which references to inline before printing a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineMode {
    /// Keep every reference.
    #[default]
    None,
    /// Inline definitions that cannot reach themselves.
    NonRecursive,
    /// Inline everything. Only valid for acyclic definitions.
    All,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub inline: InlineMode,

    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            inline: InlineMode::None,
            pretty: default_pretty(),
        }
    }
}
