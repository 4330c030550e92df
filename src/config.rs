use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

/// Environment variable holding the UCRM base URL.
pub const BASE_URL_ENV: &str = "UCRM_BASE_URL";

/// Environment variable holding the UCRM app key.
pub const APP_KEY_ENV: &str = "UCRM_APP_KEY";

/// Connection settings for one UCRM instance.
///
/// The app key is an instance-scoped credential generated in the CRM's
/// security settings; it is kept in a [`SecretString`] so it never shows up
/// in debug output or logs.
#[derive(Debug, Deserialize)]
pub struct UcrmConfig {
    /// Base URL of the UCRM REST API, e.g. `https://crm.example.com/api/v1.0`.
    pub base_url: String,

    /// Credential sent as the `X-Auth-App-Key` header on every request.
    pub app_key: SecretString,
}

impl UcrmConfig {
    pub fn new(base_url: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_key: app_key.into().into(),
        }
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: UcrmConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Read connection settings from `UCRM_BASE_URL` and `UCRM_APP_KEY`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .with_context(|| format!("{BASE_URL_ENV} is not set"))?;
        let app_key = std::env::var(APP_KEY_ENV)
            .with_context(|| format!("{APP_KEY_ENV} is not set"))?;

        Ok(Self::new(base_url, app_key))
    }

    /// Load config from a file, falling back to the environment when the
    /// file doesn't exist.
    pub fn load_or_env(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Self::from_env()
        }
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./revcast.toml` if it exists in current directory
/// 2. `~/.config/revcast/revcast.toml` (XDG config directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("revcast.toml");
    if local_config.exists() {
        return local_config;
    }

    // XDG config directory fallback
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("revcast").join("revcast.toml");
    }

    // Final fallback to local
    local_config
}
