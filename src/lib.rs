// src/lib.rs
//! fernet-crypt — password- or key-based authenticated encryption
//!
//! Features:
//! - Fernet tokens (AES-128-CBC + HMAC-SHA256), interoperable with other Fernet implementations
//! - PBKDF2-HMAC-SHA256 (480 000 rounds) password keys, salt prepended to the token
//! - Fixed keys from `FERNET_KEY` or any injected [`KeySource`]
//! - secure-gate secret types throughout

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod error;
pub mod file_ops;
pub mod key_ops;

// Re-export everything users need at the crate root
pub use aliases::{EncodedKey, FernetKey32, Password, PlainText};
pub use config::load as load_config;
pub use crypto::{decrypt, decrypt_to_vec, decrypt_to_vec_with_ttl, encrypt, encrypt_to_vec};
pub use error::{CoreError, ErrorKind, Result as CoreResult};
pub use key_ops::{
    generate_key, resolve_key, EnvKeySource, KeyMode, KeyResolution, KeySource, StaticKeySource,
};
