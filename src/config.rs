use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const API_KEY_ENV: &str = "GAME_TRACKER_API_KEY";
pub const API_URL_ENV: &str = "GAME_TRACKER_API_URL";

const DEFAULT_API_URL: &str = "https://api.rawg.io/api/games";
const CONFIG_FILE_NAME: &str = "config.json";

/// Resolved runtime configuration. The catalog credential is never compiled
/// into the binary; it has to come from a flag, the environment, or the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Only the key is mandatory in the config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    api_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no catalog API key configured")]
    MissingKey { searched_path: Option<PathBuf> },

    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::MissingKey { searched_path } => {
                let mut msg = format!(
                    "No catalog API key configured. Pass --api-key, set {}, ",
                    API_KEY_ENV
                );
                match searched_path {
                    Some(path) => {
                        msg.push_str(&format!(r#"or put {{"api_key": "..."}} in {}"#, path.display()))
                    }
                    None => msg.push_str("or create a config file"),
                }
                msg
            }
            ConfigError::Io { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                format!("Could not parse {}: {}", path.display(), source)
            }
        }
    }
}

impl Config {
    /// Resolve configuration from, in priority order: CLI flags, environment
    /// variables, the JSON config file in the platform config directory.
    pub fn resolve(cli_key: Option<String>, cli_url: Option<String>) -> Result<Self, ConfigError> {
        let file_path = config_file_path();
        let file = match &file_path {
            Some(path) if path.exists() => read_config_file(path)?,
            _ => ConfigFile::default(),
        };

        let api_key = cli_key
            .or_else(|| env_var(API_KEY_ENV))
            .or(file.api_key)
            .ok_or(ConfigError::MissingKey {
                searched_path: file_path,
            })?;

        let api_url = cli_url
            .or_else(|| env_var(API_URL_ENV))
            .or(file.api_url)
            .unwrap_or_else(default_api_url);

        Ok(Config { api_key, api_url })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "game-tracker", "game-tracker")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
