// src/crypto/encrypt.rs
use crate::consts::SALT_LEN;
use crate::error::Result;
use crate::key_ops::{derive_key, generate_salt, resolve_key, KeyMode, KeyResolution, KeySource};

use super::fernet::Fernet;

/// Encrypt plaintext → artifact (in-memory)
///
/// Password mode returns `salt (16) || token` under a freshly salted PBKDF2
/// key. Fixed mode returns the bare token under the external key.
pub fn encrypt_to_vec<S>(plaintext: &[u8], mode: &KeyMode, source: &S) -> Result<Vec<u8>>
where
    S: KeySource + ?Sized,
{
    match resolve_key(mode, source)? {
        KeyResolution::DeferToSalt(password) => {
            let salt = generate_salt();
            let key = derive_key(password, &salt);
            let token = Fernet::new(&key).encrypt(plaintext)?;

            let mut artifact = Vec::with_capacity(SALT_LEN + token.len());
            artifact.extend_from_slice(&salt);
            artifact.extend_from_slice(&token);
            tracing::debug!(
                plaintext_len = plaintext.len(),
                artifact_len = artifact.len(),
                "encrypted with password-derived key"
            );
            Ok(artifact)
        }
        KeyResolution::FixedKey(key) => {
            let token = Fernet::new(&key).encrypt(plaintext)?;
            tracing::debug!(
                plaintext_len = plaintext.len(),
                artifact_len = token.len(),
                "encrypted with fixed key"
            );
            Ok(token)
        }
    }
}
