use anyhow::Context;
use tess_config::TesseraConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TesseraConfig> {
    if let Some(path) = flags.config.as_deref() {
        if !path.is_file() {
            anyhow::bail!("config file '{}' does not exist", path.display());
        }
    }

    let config = TesseraConfig::load_with_dotenv_from(flags.config.as_deref())
        .context("failed to load tessera configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
