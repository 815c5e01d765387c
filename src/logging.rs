//! Logging setup for advsearch
//!
//! Installs a `tracing` subscriber that writes to `advsearch.log` next to the
//! executable, truncated on every run. If the file cannot be opened the
//! subscriber writes to stderr instead. `ADVSEARCH_LOG` overrides the level
//! with any `EnvFilter` directive.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::{AdvSearchError, Result};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "ADVSEARCH_LOG";

/// Get the log file path (same directory as executable)
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("advsearch.log")
}

/// Build the filter: `ADVSEARCH_LOG` wins, then `default_level`, then `info`.
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber. Returns the log file in use, if any.
pub fn init(default_level: &str) -> Result<Option<PathBuf>> {
    let path = log_path();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_target(true);

    match open_log(&path) {
        Some(file) => {
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| AdvSearchError::Logging(e.to_string()))?;
            Ok(Some(path))
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| AdvSearchError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}

fn open_log(path: &Path) -> Option<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(path)
        .ok()
}
