// src/crypto/mod.rs
//! Token codec — no file I/O, no configuration
//!
//! All functions work exclusively on in-memory buffers and are safe to call
//! concurrently; the only shared resource is the thread-local CSPRNG.
mod decrypt;
mod encrypt;
pub mod fernet;

pub use decrypt::{decrypt_to_vec, decrypt_to_vec_with_ttl};
pub use encrypt::encrypt_to_vec;
pub use fernet::Fernet;

use crate::aliases::PlainText;
use crate::error::Result;
use crate::key_ops::{EnvKeySource, KeyMode};

/// Encrypt with `password`, or with `FERNET_KEY` when no password is given
pub fn encrypt(plaintext: &[u8], password: Option<&str>) -> Result<Vec<u8>> {
    encrypt_to_vec(
        plaintext,
        &KeyMode::from_password(password),
        &EnvKeySource::default(),
    )
}

/// Decrypt with `password`, or with `FERNET_KEY` when no password is given
pub fn decrypt(artifact: &[u8], password: Option<&str>) -> Result<PlainText> {
    decrypt_to_vec(
        artifact,
        &KeyMode::from_password(password),
        &EnvKeySource::default(),
    )
}
