//! Configuration Management
//!
//! Handles persistent configuration storage for cmedit.

use crate::editor::CtypePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured server
pub const BASE_URL_ENV: &str = "CMEDIT_BASE_URL";

/// Server used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Content manager server
    #[serde(default)]
    pub base_url: Option<String>,
    /// Last resource loaded successfully
    #[serde(default)]
    pub last_path: Option<String>,
    /// What to send for an empty content type
    #[serde(default)]
    pub ctype_policy: Option<CtypePolicy>,
    /// File this configuration was loaded from and is saved back to
    #[serde(skip)]
    file: Option<PathBuf>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cmedit").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults.
    /// Later saves go back to the same file.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::read(path);
        config.file = Some(path.to_path_buf());
        config
    }

    fn read(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the file it was loaded from.
    /// A configuration that was never loaded from disk is not saved.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        self.save_to(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective server (CLI > env > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        self.resolve_base_url(cli, env.as_deref())
    }

    fn resolve_base_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        cli.filter(|url| !url.is_empty())
            .or(env.filter(|url| !url.is_empty()))
            .map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get effective content type policy (CLI > config > default)
    pub fn effective_ctype_policy(&self, cli: Option<CtypePolicy>) -> CtypePolicy {
        cli.or(self.ctype_policy).unwrap_or_default()
    }

    /// Remember the last loaded resource and save
    pub fn set_last_path(&mut self, path: &str) -> Result<()> {
        self.last_path = Some(path.to_string());
        self.save()
    }
}
