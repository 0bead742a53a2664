//! Locating and loading `eduprompt.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, CONFIG_FILE, parse_config_content};

pub const CONFIG_ENV: &str = "EDUPROMPT_CONFIG";
pub const USER_ENV: &str = "EDUPROMPT_USER";

/// Pick the configuration file to read.
///
/// An explicit path or `EDUPROMPT_CONFIG` must exist; the default
/// `eduprompt.toml` under `base` is optional.
pub fn resolve_config_path(
    base: &Path,
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        let path = if path.is_absolute() { path } else { base.join(path) };
        if !path.exists() {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let default = base.join(CONFIG_FILE);
    Ok(default.exists().then_some(default))
}

/// Load configuration, falling back to defaults when no file is present.
pub fn load_config(base: &Path, explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    match resolve_config_path(base, explicit, from_env)? {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            parse_config_content(&content).map_err(|err| match err {
                AppError::TomlParseError(err) => AppError::config_error(format!(
                    "Invalid config {}: {}",
                    path.display(),
                    err
                )),
                other => other,
            })
        }
        None => Ok(AppConfig::default()),
    }
}

/// `--user`, then `EDUPROMPT_USER`, then `[user] id`.
pub fn resolve_user(flag: Option<&str>, from_env: Option<String>, config: &AppConfig) -> String {
    flag.map(str::to_string)
        .or(from_env)
        .map(|user| user.trim().to_string())
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| config.user.id.clone())
}
