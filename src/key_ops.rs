// src/key_ops.rs
//! Key resolution, derivation and representation
//!
//! A key comes from exactly one of two places per operation: PBKDF2 over a
//! password and a per-artifact salt, or a fixed key read from an external
//! source (the `FERNET_KEY` environment variable by default).

use std::fmt;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::aliases::{EncodedKey, FernetKey32, Password};
use crate::consts::{DEFAULT_KEY_ENV_VAR, KDF_ITERATIONS, KEY_LEN, SALT_LEN};
use crate::error::{CoreError, Result};

pub type Key = FernetKey32;
pub type Salt = [u8; SALT_LEN];

/// How the key for a single encrypt/decrypt call is obtained
pub enum KeyMode {
    /// Derive from this password and the artifact's salt
    Password(Password),
    /// Use the fixed key from the external key source
    Fixed,
}

impl KeyMode {
    pub fn password(password: impl Into<String>) -> Self {
        KeyMode::Password(Password::new(password.into()))
    }

    /// An absent or empty password selects the external key.
    pub fn from_password(password: Option<&str>) -> Self {
        match password {
            Some(pw) if !pw.is_empty() => Self::password(pw),
            _ => KeyMode::Fixed,
        }
    }

    pub fn is_password(&self) -> bool {
        matches!(self, KeyMode::Password(_))
    }
}

impl fmt::Debug for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Password(_) => f.write_str("Password([REDACTED])"),
            KeyMode::Fixed => f.write_str("Fixed"),
        }
    }
}

/// Outcome of [`resolve_key`]
pub enum KeyResolution<'a> {
    /// Key must be derived once a salt is known (fresh on encrypt, embedded on decrypt)
    DeferToSalt(&'a Password),
    /// Validated key from the external source
    FixedKey(Key),
}

impl fmt::Debug for KeyResolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyResolution::DeferToSalt(_) => f.write_str("DeferToSalt"),
            KeyResolution::FixedKey(_) => f.write_str("FixedKey([REDACTED])"),
        }
    }
}

/// Trusted out-of-band source of a URL-safe base64 Fernet key
pub trait KeySource: Send + Sync {
    fn lookup(&self) -> Option<EncodedKey>;

    /// Human-readable name used in error messages
    fn describe(&self) -> String {
        "external key source".to_owned()
    }
}

/// Reads the key from an environment variable on every lookup
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvKeySource {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_ENV_VAR)
    }
}

impl KeySource for EnvKeySource {
    fn lookup(&self) -> Option<EncodedKey> {
        let value = std::env::var_os(&self.var)?;
        if value.is_empty() {
            return None;
        }
        Some(EncodedKey::new(value.into_encoded_bytes()))
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}

/// Key source holding a fixed value, or nothing at all
pub struct StaticKeySource {
    encoded: Option<EncodedKey>,
}

impl StaticKeySource {
    pub fn new(encoded: impl Into<Vec<u8>>) -> Self {
        Self {
            encoded: Some(EncodedKey::new(encoded.into())),
        }
    }

    pub fn from_key(key: &Key) -> Self {
        Self::new(encode_key(key))
    }

    pub fn empty() -> Self {
        Self { encoded: None }
    }
}

impl KeySource for StaticKeySource {
    fn lookup(&self) -> Option<EncodedKey> {
        self.encoded
            .as_ref()
            .map(|k| EncodedKey::new(k.expose_secret().clone()))
    }

    fn describe(&self) -> String {
        "configured key".to_owned()
    }
}

/// Decide where the key for `mode` comes from.
///
/// Password mode defers derivation until a salt is available. Fixed mode
/// looks the key up immediately and fails with `KeyUnavailable` if it is
/// missing or malformed.
pub fn resolve_key<'a, S>(mode: &'a KeyMode, source: &S) -> Result<KeyResolution<'a>>
where
    S: KeySource + ?Sized,
{
    match mode {
        KeyMode::Password(password) => Ok(KeyResolution::DeferToSalt(password)),
        KeyMode::Fixed => {
            let encoded = source.lookup().ok_or_else(|| {
                CoreError::KeyUnavailable(format!(
                    "no password provided and {} is not set",
                    source.describe()
                ))
            })?;
            let key = decode_key(encoded.expose_secret()).map_err(|e| match e {
                CoreError::KeyUnavailable(reason) => {
                    CoreError::KeyUnavailable(format!("{}: {reason}", source.describe()))
                }
                other => other,
            })?;
            tracing::debug!(source = %source.describe(), "resolved fixed key");
            Ok(KeyResolution::FixedKey(key))
        }
    }
}

/// PBKDF2-HMAC-SHA256 over `password` and `salt` with [`KDF_ITERATIONS`] rounds.
///
/// CPU-bound for a noticeable fraction of a second; async callers should run
/// it on a blocking worker.
pub fn derive_key(password: &Password, salt: &Salt) -> Key {
    derive_key_with_rounds(password.expose_secret().as_bytes(), salt, KDF_ITERATIONS)
}

fn derive_key_with_rounds(password: &[u8], salt: &[u8], rounds: u32) -> Key {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut bytes);
    let key = Key::new(bytes);
    bytes.zeroize();
    key
}

/// Validate an externally supplied key: URL-safe base64 of exactly 32 bytes
pub fn decode_key(encoded: &[u8]) -> Result<Key> {
    let decoded = Zeroizing::new(URL_SAFE.decode(encoded.trim_ascii()).map_err(|_| {
        CoreError::KeyUnavailable("key is not valid url-safe base64".to_owned())
    })?);

    let mut bytes: [u8; KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
        CoreError::KeyUnavailable(format!(
            "key must decode to {KEY_LEN} bytes, got {}",
            decoded.len()
        ))
    })?;
    let key = Key::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// URL-safe base64 (padded), the form Fernet keys are exchanged in
pub fn encode_key(key: &Key) -> String {
    URL_SAFE.encode(key.expose_secret())
}

/// Fresh random 256-bit Fernet key
pub fn generate_key() -> Key {
    let mut bytes: [u8; KEY_LEN] = rand::random();
    let key = Key::new(bytes);
    bytes.zeroize();
    key
}

#[inline]
pub fn generate_salt() -> Salt {
    rand::random()
}
