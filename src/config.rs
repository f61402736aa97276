//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the authentication endpoint override and the last used
//! anonymous ID.
//!
//! Configuration is stored at `~/.config/veil/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "veil";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Override for the authentication endpoint; the compiled-in default
    /// is used when absent
    pub auth_url: Option<String>,
    /// Last anonymous ID that signed in, used to prefill the login form
    pub last_anonymous_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Data directory holding the credential store and log file
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Resolve the auth endpoint: env var, then config, then default
    pub fn auth_url(&self) -> String {
        std::env::var("VEIL_AUTH_URL")
            .ok()
            .or_else(|| self.auth_url.clone())
            .unwrap_or_else(|| crate::api::DEFAULT_AUTH_URL.to_string())
    }
}
