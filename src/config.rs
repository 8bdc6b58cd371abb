//! Configuration Management
//!
//! Handles persistent configuration storage for the `linode` CLI.

use crate::api::DEFAULT_API_URL;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding a personal access token
pub const TOKEN_ENV: &str = "LINODE_TOKEN";

/// Environment variable overriding the API root
pub const API_URL_ENV: &str = "LINODE_API_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Personal access token
    #[serde(default)]
    pub token: Option<String>,
    /// API root, e.g. `https://api.linode.com/v4`
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("linode").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective token (CLI > environment > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| non_empty_env(TOKEN_ENV))
            .or_else(|| self.token.clone())
    }

    /// Get effective API root (CLI > environment > config > default)
    pub fn effective_api_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| non_empty_env(API_URL_ENV))
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Set token and save
    pub fn set_token(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        self.save()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("linode-sdk-config-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let config = Config::load_from(&temp_path("missing"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let config = Config {
            token: Some("abc".to_string()),
            api_url: Some("https://api.alpha.linode.com/v4".to_string()),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_loads_defaults() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_cli_flag_wins() {
        let config = Config {
            token: Some("from-config".to_string()),
            api_url: Some("https://example.invalid/v4".to_string()),
        };
        assert_eq!(
            config.effective_token(Some("from-cli")).as_deref(),
            Some("from-cli")
        );
        assert_eq!(
            config.effective_api_url(Some("https://cli.invalid/v4")),
            "https://cli.invalid/v4"
        );
    }
}
