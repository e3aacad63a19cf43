// src/crypto/decrypt.rs
use std::time::Duration;

use crate::aliases::PlainText;
use crate::consts::SALT_LEN;
use crate::error::{CoreError, Result};
use crate::key_ops::{derive_key, resolve_key, KeyMode, KeyResolution, KeySource, Salt};

use super::fernet::Fernet;

/// Decrypt artifact → plaintext (in-memory), no age limit
pub fn decrypt_to_vec<S>(artifact: &[u8], mode: &KeyMode, source: &S) -> Result<PlainText>
where
    S: KeySource + ?Sized,
{
    open(artifact, mode, source, None)
}

/// Like [`decrypt_to_vec`], but rejects tokens older than `ttl`
pub fn decrypt_to_vec_with_ttl<S>(
    artifact: &[u8],
    mode: &KeyMode,
    source: &S,
    ttl: Duration,
) -> Result<PlainText>
where
    S: KeySource + ?Sized,
{
    open(artifact, mode, source, Some(ttl))
}

fn open<S>(artifact: &[u8], mode: &KeyMode, source: &S, ttl: Option<Duration>) -> Result<PlainText>
where
    S: KeySource + ?Sized,
{
    let (fernet, token) = match resolve_key(mode, source)? {
        KeyResolution::DeferToSalt(password) => {
            if artifact.len() < SALT_LEN {
                return Err(CoreError::InvalidToken("too short to contain salt"));
            }
            let (salt, token) = artifact.split_at(SALT_LEN);
            let mut salt_bytes: Salt = [0u8; SALT_LEN];
            salt_bytes.copy_from_slice(salt);
            (Fernet::new(&derive_key(password, &salt_bytes)), token)
        }
        KeyResolution::FixedKey(key) => (Fernet::new(&key), artifact),
    };

    let plaintext = match ttl {
        Some(ttl) => fernet.decrypt_with_ttl(token, ttl),
        None => fernet.decrypt(token),
    }
    .inspect_err(|e| tracing::debug!(error = %e, "token rejected"))?;

    tracing::debug!(
        artifact_len = artifact.len(),
        plaintext_len = plaintext.len(),
        password_mode = mode.is_password(),
        "decrypted artifact"
    );
    Ok(PlainText::new(plaintext))
}
