// src/config/app.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::defaults::*;
use crate::consts::CONFIG_ENV_VAR;
use crate::error::CoreError;
use crate::file_ops::append_extension;
use crate::key_ops::EnvKeySource;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_key_settings")]
    pub key: KeySettings,
    #[serde(default = "default_token_settings")]
    pub token: TokenSettings,
    #[serde(default = "default_output_settings")]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySettings {
    /// Environment variable holding the fixed key
    #[serde(default = "default_env_var")]
    pub env_var: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    /// Maximum token age on decryption; unset means no limit
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_encrypted_extension")]
    pub encrypted_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            key: default_key_settings(),
            token: default_token_settings(),
            output: default_output_settings(),
        }
    }
}

impl Config {
    pub fn ttl(&self) -> Option<Duration> {
        self.token.ttl_secs.map(Duration::from_secs)
    }

    pub fn key_source(&self) -> EnvKeySource {
        EnvKeySource::new(self.key.env_var.clone())
    }

    /// `path` with the configured encrypted-file suffix appended
    pub fn encrypted_path_for(&self, path: &Path) -> PathBuf {
        append_extension(path, &self.output.encrypted_extension)
    }
}

/// `$FERNET_CRYPT_CONFIG`, else `<config dir>/fernet-crypt/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
    }
}

/// Load config from the default location — falls back to defaults if missing
pub fn load() -> Result<Config, CoreError> {
    match default_config_path() {
        Some(path) if path.exists() => load_from(&path),
        Some(path) => {
            tracing::debug!(path = %path.display(), "no config file, using built-in defaults");
            Ok(Config::default())
        }
        None => {
            tracing::debug!("no config directory, using built-in defaults");
            Ok(Config::default())
        }
    }
}

/// Load config from an explicit TOML file
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config, CoreError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let conf: Config = toml::from_str(&content)?;
    tracing::debug!(path = %path.as_ref().display(), "loaded config");
    Ok(conf)
}
