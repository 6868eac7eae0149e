//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to a file. `RUST_LOG`
//! overrides the configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use stratagem_core::config::LogConfig;

/// Build the filter: `RUST_LOG` if set and valid, else the configured level.
pub fn filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'")),
    }
}

/// `<local data dir>/stratagem/stratagem.log`, or the temp dir when the
/// platform has no data dir.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("stratagem")
        .join("stratagem.log")
}

/// The configured log file, or the per-user default.
pub fn log_path(config: &LogConfig) -> PathBuf {
    config.file.clone().unwrap_or_else(default_log_path)
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging is disabled. Nothing is installed on error.
pub fn init(config: &LogConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }
    let filter = filter(&config.level)?;
    let path = log_path(config);
    let file = open_log(&path)?;

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;
    Ok(Some(path))
}

fn open_log(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}
