//! File logging. The terminal is owned by the renderer, so nothing is
//! ever written to stdout or stderr while the animation runs.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::{OptionExt, eyre};
use plexus_config::{Config, LogConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive. Setting it enables
/// logging regardless of the config file.
pub const LOG_ENV: &str = "PLEXUS_LOG";

/// Install the global subscriber if logging is enabled.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    let directive = std::env::var(LOG_ENV).ok();
    if directive.is_none() && !config.enabled {
        return Ok(());
    }
    let filter = EnvFilter::try_new(directive.as_deref().unwrap_or(&config.level))?;

    let path = config
        .file
        .clone()
        .or_else(Config::default_log_path)
        .ok_or_eyre("no location available for the log file")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
