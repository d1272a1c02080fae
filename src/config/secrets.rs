// Credential lookup for the Anthropic provider
//
// Resolution order:
// 1. ANTHROPIC_API_KEY environment variable
// 2. ./.env in the working directory (TOML, `[anthropic] api_key = "..."`)
// 3. An explicit secrets file from the settings, if configured
// 4. ~/.lens-selector/secrets.toml
//
// Blank values are treated as missing.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Secrets file layout, shared by `.env` and `secrets.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    #[serde(default)]
    pub anthropic: Option<ProviderSecret>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderSecret {
    #[serde(default)]
    pub api_key: Option<String>,
}

impl SecretsConfig {
    /// Get the global secrets file path (~/.lens-selector/secrets.toml)
    pub fn get_secrets_path() -> Option<PathBuf> {
        super::app_dir().map(|p| p.join("secrets.toml"))
    }

    /// Load secrets from a file. A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read secrets file '{}': {}", path.display(), e))?;

        toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse secrets file '{}': {}", path.display(), e))
    }

    /// The Anthropic key, if present and non-blank
    pub fn anthropic_api_key(&self) -> Option<String> {
        self.anthropic
            .as_ref()
            .and_then(|s| s.api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }
}

/// Candidate secrets files, in lookup order
pub fn candidate_files(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(".env")];
    if let Some(path) = explicit {
        files.push(path.to_path_buf());
    }
    if let Some(global) = SecretsConfig::get_secrets_path() {
        files.push(global);
    }
    files
}

/// Resolve the key from an environment value and a list of files
pub fn resolve_api_key_from(env_value: Option<String>, files: &[PathBuf]) -> Result<String> {
    if let Some(key) = env_value
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
    {
        log::debug!("Using API key from {}", API_KEY_ENV);
        return Ok(key.to_string());
    }

    for path in files {
        match SecretsConfig::load_from(path) {
            Ok(secrets) => {
                if let Some(key) = secrets.anthropic_api_key() {
                    log::debug!("Using API key from {}", path.display());
                    return Ok(key);
                }
            }
            Err(e) => log::warn!("Error reading API key: {}", e),
        }
    }

    Err(anyhow!(
        "API key not found. Set {} or add [anthropic] api_key to .env or ~/.lens-selector/secrets.toml",
        API_KEY_ENV
    ))
}

/// Resolve the Anthropic API key from the environment and secrets files
pub fn resolve_anthropic_api_key(explicit: Option<&Path>) -> Result<String> {
    resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), &candidate_files(explicit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_env_value_wins() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, ".env", "[anthropic]\napi_key = \"from-file\"\n");
        let key = resolve_api_key_from(Some(" from-env ".to_string()), &[file]).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_blank_env_falls_through_to_file() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, ".env", "[anthropic]\napi_key = \"sk-file\"\n");
        let key = resolve_api_key_from(Some("   ".to_string()), &[file]).unwrap();
        assert_eq!(key, "sk-file");
    }

    #[test]
    fn test_first_file_with_key_wins() {
        let dir = TempDir::new().unwrap();
        let empty = write(&dir, "a.toml", "[anthropic]\napi_key = \"  \"\n");
        let broken = write(&dir, "b.toml", "this is not toml [");
        let good = write(&dir, "c.toml", "[anthropic]\napi_key = \"sk-c\"\n");
        let missing = dir.path().join("missing.toml");
        let key = resolve_api_key_from(None, &[missing, empty, broken, good]).unwrap();
        assert_eq!(key, "sk-c");
    }

    #[test]
    fn test_missing_everywhere_is_error() {
        let dir = TempDir::new().unwrap();
        let other = write(&dir, "other.toml", "[other]\nvalue = 1\n");
        let err = resolve_api_key_from(None, &[other]).unwrap_err();
        assert!(err.to_string().contains("API key not found"));
    }

    #[test]
    fn test_candidate_files_order() {
        let files = candidate_files(Some(Path::new("/etc/lens/secrets.toml")));
        assert_eq!(files[0], PathBuf::from(".env"));
        assert_eq!(files[1], PathBuf::from("/etc/lens/secrets.toml"));
    }
}
