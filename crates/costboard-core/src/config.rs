//! API credential persistence
//!
//! Stores the billing API token and enterprise slug in
//! `<config_dir>/costboard/api.json`. Created on explicit save, destroyed
//! on explicit clear; no expiry or rotation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const CONFIG_FILE: &str = "api.json";

/// Saved billing API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub token: String,
    pub enterprise: String,
}

impl ApiConfig {
    /// Default config directory (`~/.config/costboard` on Linux)
    pub fn default_dir() -> Result<PathBuf, CoreError> {
        dirs::config_dir()
            .map(|d| d.join("costboard"))
            .ok_or(CoreError::ConfigDir)
    }

    /// Load saved credentials, `None` if absent or unreadable
    pub fn load(config_dir: &Path) -> Option<Self> {
        let path = config_dir.join(CONFIG_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persist credentials, creating the directory as needed
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)
            .context("Failed to create config directory for credentials")?;
        let path = config_dir.join(CONFIG_FILE);
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize credentials")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write credentials to {}", path.display()))
    }

    /// Remove saved credentials; returns whether anything was deleted
    pub fn clear(config_dir: &Path) -> Result<bool> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete credentials at {}", path.display()))?;
        Ok(true)
    }
}
