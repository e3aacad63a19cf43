// src/config/mod.rs
//! Configuration for fernet-crypt
//!
//! TOML file with built-in defaults; the file location can be overridden
//! with `FERNET_CRYPT_CONFIG`.

pub use app::{
    default_config_path, load, load_from, Config, KeySettings, OutputSettings, TokenSettings,
};

mod app;
mod defaults;
