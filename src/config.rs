use crate::errors::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `~/.config/parlance/config.json` when it
    /// exists, otherwise starts from defaults. The `CHAT_BACKEND_URL`
    /// environment variable (typically via `.env`) overrides either source.
    pub fn load() -> ChatResult<Self> {
        let config = match config_path() {
            Ok(path) if path.exists() => Self::from_file(&path)?,
            _ => Config::default(),
        };
        Ok(config.with_env_overrides())
    }

    pub fn from_file(path: &Path) -> ChatResult<Self> {
        let config_str = fs::read_to_string(path)
            .map_err(|e| ChatError::config_error(format!("failed to read config file: {}", e)))?;
        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("failed to parse config: {}", e)))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("CHAT_BACKEND_URL") {
            if !url.trim().is_empty() {
                self.backend_url = url;
            }
        }
        self
    }
}

fn config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("could not determine home directory"))?;
    Ok(home_dir
        .join(".config")
        .join("parlance")
        .join("config.json"))
}

fn validate_config(config: &Config) -> ChatResult<()> {
    if config.backend_url.is_empty() {
        return Err(ChatError::config_error("backend_url is required"));
    }
    if !config.backend_url.starts_with("http://") && !config.backend_url.starts_with("https://") {
        return Err(ChatError::config_error(
            "backend_url must start with http:// or https://",
        ));
    }
    if config.log_level.is_empty() {
        return Err(ChatError::config_error("log_level is required"));
    }
    Ok(())
}
