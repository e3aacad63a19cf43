// src/consts.rs
//! Shared constants — security parameters and token framing

/// PBKDF2-HMAC-SHA256 rounds for password-derived keys.
///
/// Fixed security parameter: tokens produced with a different count cannot be
/// opened, so this must never be lowered or made configurable.
pub const KDF_ITERATIONS: u32 = 480_000;

/// Random salt prepended to every password-mode artifact
pub const SALT_LEN: usize = 16;

/// Fernet key: signing half followed by encryption half
pub const KEY_LEN: usize = 32;
pub const SIGNING_KEY_LEN: usize = 16;

/// Fernet token framing
pub const FERNET_VERSION: u8 = 0x80;
pub const TIMESTAMP_LEN: usize = 8;
pub const IV_LEN: usize = 16;
pub const HMAC_LEN: usize = 32;
pub const AES_BLOCK_LEN: usize = 16;

/// Offset of the first ciphertext byte in a decoded token
pub const CIPHERTEXT_OFFSET: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Smallest decoded token: header, one padded block, tag
pub const MIN_TOKEN_LEN: usize = CIPHERTEXT_OFFSET + AES_BLOCK_LEN + HMAC_LEN;

/// How far in the future a token timestamp may be when a TTL is enforced
pub const MAX_CLOCK_SKEW_SECS: u64 = 60;

/// Environment variable consulted when no password is given
pub const DEFAULT_KEY_ENV_VAR: &str = "FERNET_KEY";

/// Suffix appended to encrypted files
pub const ENCRYPTED_EXTENSION: &str = "enc";

/// Suffix used when a decrypted file has no `.enc` suffix to strip
pub const DECRYPTED_EXTENSION: &str = "dec";

/// Overrides the config file location
pub const CONFIG_ENV_VAR: &str = "FERNET_CRYPT_CONFIG";
