// src/config/defaults.rs
use crate::config::app::{KeySettings, OutputSettings, TokenSettings};
use crate::consts::{DEFAULT_KEY_ENV_VAR, ENCRYPTED_EXTENSION};

pub const CONFIG_DIR_NAME: &str = "fernet-crypt";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub fn default_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.into()
}

pub fn default_encrypted_extension() -> String {
    ENCRYPTED_EXTENSION.into()
}

pub fn default_key_settings() -> KeySettings {
    KeySettings {
        env_var: default_env_var(),
    }
}

pub fn default_token_settings() -> TokenSettings {
    TokenSettings { ttl_secs: None }
}

pub fn default_output_settings() -> OutputSettings {
    OutputSettings {
        encrypted_extension: default_encrypted_extension(),
    }
}
