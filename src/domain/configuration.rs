//! Application configuration loaded from `eduprompt.toml`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

pub const CONFIG_FILE: &str = "eduprompt.toml";

/// Longest accepted cache lifetime: 30 days.
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.cache.validate()?;
        if self.user.id.trim().is_empty() {
            return Err(AppError::config_error("user.id must not be blank"));
        }
        if !LOG_LEVELS.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(AppError::config_error(format!(
                "log.level must be one of {} (got '{}')",
                LOG_LEVELS.join(", "),
                self.log.level
            )));
        }
        Ok(())
    }
}

/// Prompt cache tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Lifetime of a cached prompt in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Entry count above which a write sweeps expired entries.
    #[serde(default = "default_sweep_threshold")]
    pub sweep_threshold: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs(), sweep_threshold: default_sweep_threshold() }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.ttl_secs == 0 {
            return Err(AppError::config_error("cache.ttl_secs must be greater than 0"));
        }
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(AppError::config_error(format!(
                "cache.ttl_secs must be at most {MAX_TTL_SECS} (got {})",
                self.ttl_secs
            )));
        }
        if self.sweep_threshold == 0 {
            return Err(AppError::config_error("cache.sweep_threshold must be greater than 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Directory holding one JSON file per saved prompt.
    #[serde(default = "default_library_dir")]
    pub dir: PathBuf,
    /// Users allowed to hide shared prompts.
    #[serde(default)]
    pub moderators: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { dir: default_library_dir(), moderators: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { id: default_user_id() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_sweep_threshold() -> usize {
    1000
}

fn default_library_dir() -> PathBuf {
    PathBuf::from(".eduprompt/library")
}

fn default_user_id() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Parse and validate configuration from TOML text.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
