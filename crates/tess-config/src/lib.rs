//! # tess-config
//!
//! Layered configuration loading for Tessera using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TESSERA_*` prefix, `__` as separator)
//! 2. An explicit extra TOML file (the CLI's `--config`)
//! 3. Project-level `.tessera/config.toml`
//! 4. User-level `~/.config/tessera/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TESSERA_SYNTHESIS__COMPACT_ENUMS` -> `synthesis.compact_enums`,
//! `TESSERA_OUTPUT__INLINE` -> `output.inline`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tess_config::TesseraConfig;
//!
//! let config = TesseraConfig::load_with_dotenv().expect("config");
//!
//! if config.synthesis.compact_enums {
//!     println!("all-nullary sums become string enums");
//! }
//! ```

mod error;
mod output;
mod synthesis;

pub use error::ConfigError;
pub use output::{InlineMode, OutputConfig};
pub use synthesis::SynthesisConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TesseraConfig {
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl TesseraConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if the merged synthesis options are
    /// inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration with an extra TOML file layered above the project
    /// file and below environment variables.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra).extract()?;
        config.synthesis.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then configuration from all
    /// sources. Variables already set in the environment win over `.env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if `.env` exists but is malformed,
    /// otherwise the same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_with_dotenv_from(None)
    }

    /// [`Self::load_with_dotenv`] with an extra TOML file, as in
    /// [`Self::load_from`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_with_dotenv`].
    pub fn load_with_dotenv_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_dotenv(Path::new(".env"))?;
        Self::load_from(extra)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the figment provider chain with an optional extra TOML layer.
    #[must_use]
    pub fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tessera/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("TESSERA_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tessera").join("config.toml"))
    }

    fn load_dotenv(path: &Path) -> Result<(), ConfigError> {
        if path.is_file() {
            dotenvy::from_path(path).map_err(|source| ConfigError::Dotenv {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}
