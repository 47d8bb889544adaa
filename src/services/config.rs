//! User configuration
//!
//! Read from `~/.apptrack/config.json`. Every field is optional; a missing
//! file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::types::{AppTrackError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_WINDOW_DAYS: i64 = 7;
/// Ten years of history; the OS keeps far less
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Apps listed per page
    pub page_size: usize,
    /// Days of history queried on each refresh
    pub window_days: i64,
    /// Hide system apps unless overridden on the command line
    pub exclude_system_apps: bool,
    /// Directory holding JSONL usage exports
    pub data_dir: PathBuf,
    /// Package metadata snapshot (labels and system flags)
    pub packages_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_dir(default_base_dir())
    }
}

impl Config {
    /// Defaults rooted at `base_dir` instead of `~/.apptrack`
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_days: DEFAULT_WINDOW_DAYS,
            exclude_system_apps: false,
            data_dir: base_dir.join("usage"),
            packages_file: base_dir.join("packages.json"),
        }
    }

    /// Load `~/.apptrack/config.json`, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&default_base_dir().join("config.json"))
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| AppTrackError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AppTrackError::Config("page_size must be at least 1".into()));
        }
        if self.window_days <= 0 {
            return Err(AppTrackError::Config(
                "window_days must be at least 1".into(),
            ));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(AppTrackError::Config(format!(
                "window_days must be at most {}",
                MAX_WINDOW_DAYS
            )));
        }
        Ok(())
    }
}

fn default_base_dir() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(".apptrack"),
        None => {
            tracing::warn!("could not determine home directory");
            PathBuf::from(".apptrack")
        }
    }
}
