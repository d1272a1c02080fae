// Configuration: settings file and provider credentials

pub mod secrets;
pub mod settings;

pub use secrets::{resolve_anthropic_api_key, SecretsConfig};
pub use settings::{ServerSettings, Settings};

use std::path::PathBuf;

/// Per-user application directory (~/.lens-selector)
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".lens-selector"))
}
