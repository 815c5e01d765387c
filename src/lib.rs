//! advsearch - Advanced search builder for X/Twitter
//!
//! Fill structured fields, get the site's advanced-search syntax back,
//! then run it in the browser or copy it to the clipboard.
//!
//! # Features
//!
//! - **Query Builder**: exact phrase, OR-words, exclusions, author, date range
//!   and media filters composed into one query string
//! - **Input Validation**: per-field verdicts with human-readable reasons
//! - **Fallback Execution**: browser first, printed link second; clipboard
//!   first, manual copy second
//! - **Floating Panel**: draggable, edge-snapping, minimizable egui panel that
//!   remembers where you left it
//!
//! # Example
//!
//! ```
//! use advsearch::{build, validate, SearchFormState};
//!
//! let state = SearchFormState {
//!     exact_phrase: "AI future".into(),
//!     from_user: "x".into(),
//!     ..Default::default()
//! };
//!
//! assert!(validate(&state).is_valid());
//! assert_eq!(build(&state), "\"AI future\" from:x");
//! ```

pub mod error;
pub mod executor;
pub mod gui;
pub mod logging;
pub mod query;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

// Re-export main types
pub use error::{AdvSearchError, Result};
pub use executor::{Action, Outcome, SearchExecutor, Strategy, StrategyChain};
pub use query::{
    build, build_checked, search_url, validate, Field, FieldVerdict, SearchFormState,
    ValidationResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file looked up next to the executable when none is given
pub const CONFIG_FILE_NAME: &str = "advsearch.json";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Site root the search page lives under
    pub base_url: String,
    /// How long a toast stays visible
    pub toast_millis: u64,
    /// Distance from a viewport edge at which the panel snaps to it
    pub snap_threshold: f32,
    /// Gap kept between a snapped panel and the edge
    pub snap_margin: f32,
    /// Start collapsed and docked to the top-left corner
    pub start_minimized: bool,
    /// Default log filter (overridden by `ADVSEARCH_LOG`)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://x.com".to_string(),
            toast_millis: 2000,
            snap_threshold: 30.0,
            snap_margin: 10.0,
            start_minimized: true,
            log_level: "info".to_string(),
        }
    }
}

/// Where a loaded [`AppConfig`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at this path; built-in defaults were used
    Defaults(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => tracing::info!(path = %path.display(), "loaded config"),
            ConfigSource::Defaults(path) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults")
            }
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location. A missing file yields defaults.
    ///
    /// Runs before logging is set up, so it does not log; callers report
    /// [`ConfigSource`] once a subscriber is installed.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let path = Self::resolve_path(path);
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path)));
        }

        let raw = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| AdvSearchError::Config(format!("{}: {}", path.display(), e)))?;
        config.check()?;
        Ok((config, ConfigSource::File(path)))
    }

    /// The file `load` reads: `path` if given, the default location otherwise
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf).unwrap_or_else(Self::default_path)
    }

    /// `advsearch.json` in the executable's directory
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }

    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| AdvSearchError::Config(format!("base_url '{}': {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(AdvSearchError::Config(format!(
                "base_url '{}' is not a web address",
                self.base_url
            )));
        }
        Ok(url)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_millis)
    }

    fn check(&self) -> Result<()> {
        self.base_url()?;
        if !(self.snap_threshold >= 0.0 && self.snap_margin >= 0.0) {
            return Err(AdvSearchError::Config(
                "snap_threshold and snap_margin must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
