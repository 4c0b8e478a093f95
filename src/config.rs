//! Runtime configuration read from `<data dir>/config.json`.

use crate::app::DEFAULT_LEADERBOARD_SIZE;
use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_db_file")]
    pub db_file: String,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_db_file() -> String {
    "vfriends.db".to_string()
}

fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_file: default_db_file(),
            leaderboard_size: default_leaderboard_size(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Loads `config.json` from `dir`. A missing file means defaults.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let path = dir.join(CONFIG_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&raw)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.db_file.trim().is_empty() {
            return Err(AppError::Config("db_file must not be empty".into()));
        }
        if config.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(AppError::Config(format!(
                "unknown log_level: {}",
                config.log_level
            )));
        }
        Ok(config)
    }

    /// Database location: `db_file` as-is when absolute, otherwise under `dir`.
    pub fn db_path(&self, dir: &Path) -> PathBuf {
        let file = Path::new(&self.db_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            dir.join(file)
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

/// Per-user data directory, falling back to the working directory.
pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("vfriends")
}
