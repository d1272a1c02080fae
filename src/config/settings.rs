// Application settings loaded from TOML
//
// Every key is optional; anything left out keeps its default. The default
// location is ~/.lens-selector/config.toml and it is fine for it not to exist.

use crate::providers::{AnthropicConfig, BedrockConfig, ProviderKind};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind: String,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderKind,
    pub anthropic: AnthropicConfig,
    pub bedrock: BedrockConfig,
    pub server: ServerSettings,
    /// Extra secrets file consulted before the global one
    pub secrets_file: Option<PathBuf>,
}

impl Settings {
    /// Get the default settings path (~/.lens-selector/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        super::app_dir().map(|p| p.join("config.toml"))
    }

    /// Parse settings from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| anyhow!("Failed to parse settings: {}", e))
    }

    /// Load settings from a file that must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read settings file '{}': {}", path.display(), e))?;
        let settings = Self::from_toml(&contents)
            .map_err(|e| anyhow!("{} ('{}')", e, path.display()))?;
        log::info!("Loaded settings from: {}", path.display());
        Ok(settings)
    }

    /// Load from an explicit path, or from the default location when present
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
