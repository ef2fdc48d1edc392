use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::Time;
use time::macros::format_description;

const CONFIG_FILE_NAME: &str = "server.json";
const CONFIG_ENV_VAR: &str = "TODOAPP_CONFIG_PATH";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";
pub const DEFAULT_PURGE_AT: &str = "02:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub database_url: String,
    pub cors_origin: String,
    /// UTC time of day (`HH:MM`) for the daily purge.
    pub purge_at: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            purge_at: DEFAULT_PURGE_AT.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn purge_time(&self) -> Result<Time, AppError> {
        parse_time_of_day(&self.purge_at)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ServerConfig,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub database_url: Option<String>,
    pub cors_origin: Option<String>,
    pub purge_at: Option<String>,
}

pub fn parse_time_of_day(raw: &str) -> Result<Time, AppError> {
    Time::parse(raw.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| AppError::invalid_input(format!("'{raw}' is not a HH:MM time of day")))
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("todoapp")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("todoapp")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: ServerConfig::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: ServerConfig::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: ServerConfig::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<ServerConfig, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

pub fn merge_overrides(base: &ServerConfig, overrides: &ConfigOverrides) -> ServerConfig {
    let mut merged = base.clone();
    if let Some(bind) = overrides.bind.as_ref() {
        merged.bind = bind.clone();
    }
    if let Some(database_url) = overrides.database_url.as_ref() {
        merged.database_url = database_url.clone();
    }
    if let Some(cors_origin) = overrides.cors_origin.as_ref() {
        merged.cors_origin = cors_origin.clone();
    }
    if let Some(purge_at) = overrides.purge_at.as_ref() {
        merged.purge_at = purge_at.clone();
    }
    merged
}
