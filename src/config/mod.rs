//! Configuration management.
//!
//! Settings come from defaults, then an optional TOML file, then
//! `WOS_SEARCH_*` environment variables. The API key also falls back to
//! `WOS_API_KEY`.
//!
//! # Configuration File Format
//!
//! ```toml
//! api_key = "your-api-key"
//! base_url = "https://api.clarivate.com/apis/wos-starter/v1/documents"
//! database = "WOK"
//! page_delay_secs = 10
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Database;
use crate::utils::STARTER_API_URL;

/// File name looked up by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "wos-search.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Web of Science Starter API key
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Document search endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Database searched when a request does not name one
    #[serde(default)]
    pub database: Database,

    /// Pause between consecutive page requests
    #[serde(default = "default_page_delay")]
    pub page_delay_secs: u64,

    /// HTTP request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            database: Database::default(),
            page_delay_secs: default_page_delay(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_key() -> Option<String> {
    std::env::var("WOS_API_KEY").ok().filter(|k| !k.is_empty())
}

fn default_base_url() -> String {
    STARTER_API_URL.to_string()
}

fn default_page_delay() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Replace the API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Render as TOML (used to write a starter config file)
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))
    }

    /// Write as TOML to `path`
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("WOS_SEARCH"))
        .build()?;

    settings.try_deserialize()
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::Environment::with_prefix("WOS_SEARCH"))
        .build()?
        .try_deserialize()
}

/// Look for `wos-search.toml` in the working directory, then the user
/// config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("wos-search").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, STARTER_API_URL);
        assert_eq!(config.database, Database::Wok);
        assert_eq!(config.page_delay_secs, 10);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wos-search.toml");

        std::fs::write(
            &path,
            r#"
api_key = "file-key"
database = "WOS"
page_delay_secs = 5
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api_key, Some("file-key".to_string()));
        assert_eq!(config.database, Database::Wos);
        assert_eq!(config.page_delay_secs, 5);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_url, STARTER_API_URL);
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let config = Config {
            api_key: Some("saved-key".to_string()),
            page_delay_secs: 2,
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.api_key, Some("saved-key".to_string()));
        assert_eq!(loaded.page_delay_secs, 2);
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = load_config(Path::new("/nonexistent/wos-search.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_invalid_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "database = \"SCOPUS\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
