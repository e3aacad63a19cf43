// src/crypto/fernet.rs
//! Fernet authenticated encryption
//!
//! Token layout before base64url encoding:
//! `0x80 || timestamp (u64 BE) || IV (16) || AES-128-CBC ciphertext || HMAC-SHA256 (32)`.
//! The tag covers every preceding byte. The first half of the 32-byte key
//! signs, the second half encrypts.

use std::time::Duration;

use aes::Aes128;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::aliases::FernetKey32;
use crate::consts::{
    AES_BLOCK_LEN, CIPHERTEXT_OFFSET, FERNET_VERSION, HMAC_LEN, IV_LEN, MAX_CLOCK_SKEW_SECS,
    MIN_TOKEN_LEN, SIGNING_KEY_LEN, TIMESTAMP_LEN,
};
use crate::error::{CoreError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

pub struct Fernet {
    key: FernetKey32,
}

impl Fernet {
    pub fn new(key: &FernetKey32) -> Self {
        Self {
            key: FernetKey32::new(*key.expose_secret()),
        }
    }

    fn signing_key(&self) -> &[u8] {
        &self.key.expose_secret()[..SIGNING_KEY_LEN]
    }

    fn encryption_key(&self) -> &[u8] {
        &self.key.expose_secret()[SIGNING_KEY_LEN..]
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.signing_key())
            .map_err(|e| CoreError::Unexpected(format!("HMAC init failed: {e}")))
    }

    /// Encrypt with the current time and a random IV; returns the base64url token
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv: [u8; IV_LEN] = rand::random();
        self.encrypt_from_parts(plaintext, unix_now()?, &iv)
    }

    pub(crate) fn encrypt_from_parts(
        &self,
        plaintext: &[u8],
        timestamp: u64,
        iv: &[u8; IV_LEN],
    ) -> Result<Vec<u8>> {
        let ciphertext = Aes128CbcEnc::new_from_slices(self.encryption_key(), iv)
            .map_err(|e| CoreError::Unexpected(format!("cipher init failed: {e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut token = Vec::with_capacity(CIPHERTEXT_OFFSET + ciphertext.len() + HMAC_LEN);
        token.push(FERNET_VERSION);
        token.extend_from_slice(&timestamp.to_be_bytes());
        token.extend_from_slice(iv);
        token.extend_from_slice(&ciphertext);

        let mut mac = self.mac()?;
        mac.update(&token);
        token.extend_from_slice(&mac.finalize().into_bytes());

        Ok(URL_SAFE.encode(&token).into_bytes())
    }

    /// Verify and decrypt without any age limit
    pub fn decrypt(&self, token: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_at(token, None)
    }

    /// Verify and decrypt, rejecting tokens older than `ttl` or stamped too far in the future
    pub fn decrypt_with_ttl(&self, token: &[u8], ttl: Duration) -> Result<Vec<u8>> {
        self.decrypt_at(token, Some((ttl.as_secs(), unix_now()?)))
    }

    /// `time_check` is `(ttl_secs, now_secs)`
    pub(crate) fn decrypt_at(&self, token: &[u8], time_check: Option<(u64, u64)>) -> Result<Vec<u8>> {
        let data = decode_token(token)?;
        let timestamp = timestamp_of(&data);

        if let Some((ttl, now)) = time_check {
            if timestamp.saturating_add(ttl) < now {
                return Err(CoreError::InvalidToken("token has expired"));
            }
            if now.saturating_add(MAX_CLOCK_SKEW_SECS) < timestamp {
                return Err(CoreError::InvalidToken("token timestamp is in the future"));
            }
        }

        self.verify_signature(&data)?;

        let iv = &data[1 + TIMESTAMP_LEN..CIPHERTEXT_OFFSET];
        let ciphertext = &data[CIPHERTEXT_OFFSET..data.len() - HMAC_LEN];
        if ciphertext.len() % AES_BLOCK_LEN != 0 {
            return Err(CoreError::InvalidToken("ciphertext is not block aligned"));
        }

        Aes128CbcDec::new_from_slices(self.encryption_key(), iv)
            .map_err(|e| CoreError::Unexpected(format!("cipher init failed: {e}")))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CoreError::InvalidToken("bad padding"))
    }

    /// Creation time of an authentic token, in seconds since the epoch
    pub fn extract_timestamp(&self, token: &[u8]) -> Result<u64> {
        let data = decode_token(token)?;
        self.verify_signature(&data)?;
        Ok(timestamp_of(&data))
    }

    fn verify_signature(&self, data: &[u8]) -> Result<()> {
        let (signed, tag) = data.split_at(data.len() - HMAC_LEN);
        let mut mac = self.mac()?;
        mac.update(signed);
        mac.verify_slice(tag)
            .map_err(|_| CoreError::InvalidToken("signature mismatch"))
    }
}

fn decode_token(token: &[u8]) -> Result<Vec<u8>> {
    let data = URL_SAFE
        .decode(token)
        .map_err(|_| CoreError::InvalidToken("malformed token encoding"))?;
    if data.first() != Some(&FERNET_VERSION) {
        return Err(CoreError::InvalidToken("unsupported token version"));
    }
    if data.len() < MIN_TOKEN_LEN {
        return Err(CoreError::InvalidToken("token is truncated"));
    }
    Ok(data)
}

// caller guarantees data.len() >= MIN_TOKEN_LEN
fn timestamp_of(data: &[u8]) -> u64 {
    let mut raw = [0u8; TIMESTAMP_LEN];
    raw.copy_from_slice(&data[1..1 + TIMESTAMP_LEN]);
    u64::from_be_bytes(raw)
}

fn unix_now() -> Result<u64> {
    u64::try_from(chrono::Utc::now().timestamp())
        .map_err(|_| CoreError::Unexpected("system clock is before the unix epoch".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_ops::decode_key;

    // Published Fernet test vector (generate.json / verify.json)
    const SECRET: &[u8] = b"cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=";
    const TOKEN: &[u8] = b"gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==";
    const STAMP: u64 = 499_162_800; // 1985-10-26T01:20:00-07:00
    const IV: [u8; IV_LEN] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

    fn fernet() -> Fernet {
        Fernet::new(&decode_key(SECRET).unwrap())
    }

    #[test]
    fn generates_published_vector() {
        let token = fernet().encrypt_from_parts(b"hello", STAMP, &IV).unwrap();
        assert_eq!(token, TOKEN);
    }

    #[test]
    fn verifies_published_vector() {
        let f = fernet();
        assert_eq!(f.decrypt(TOKEN).unwrap(), b"hello");
        assert_eq!(f.decrypt_at(TOKEN, Some((60, STAMP + 1))).unwrap(), b"hello");
        assert_eq!(f.extract_timestamp(TOKEN).unwrap(), STAMP);
    }

    #[test]
    fn ttl_rejects_expired_and_future_tokens() {
        let f = fernet();
        assert!(matches!(
            f.decrypt_at(TOKEN, Some((60, STAMP + 91))),
            Err(CoreError::InvalidToken("token has expired"))
        ));
        assert!(matches!(
            f.decrypt_at(TOKEN, Some((60, STAMP - MAX_CLOCK_SKEW_SECS - 1))),
            Err(CoreError::InvalidToken("token timestamp is in the future"))
        ));
        // boundary: exactly ttl seconds old is still valid
        assert!(f.decrypt_at(TOKEN, Some((60, STAMP + 60))).is_ok());
    }

    #[test]
    fn rejects_malformed_tokens() {
        let f = fernet();

        let mut bad_mac = TOKEN.to_vec();
        let n = bad_mac.len();
        bad_mac[n - 4] = if bad_mac[n - 4] == b'A' { b'B' } else { b'A' };
        assert!(matches!(
            f.decrypt(&bad_mac),
            Err(CoreError::InvalidToken("signature mismatch"))
        ));

        assert!(matches!(
            f.decrypt(b"gAAAAAAdwJ6w"),
            Err(CoreError::InvalidToken("token is truncated"))
        ));
        assert!(matches!(
            f.decrypt(b"not base64 at all!"),
            Err(CoreError::InvalidToken("malformed token encoding"))
        ));

        let mut raw = URL_SAFE.decode(TOKEN).unwrap();
        raw[0] = 0x81;
        assert!(matches!(
            f.decrypt(URL_SAFE.encode(&raw).as_bytes()),
            Err(CoreError::InvalidToken("unsupported token version"))
        ));
    }

    #[test]
    fn wrong_key_fails_signature() {
        let other = Fernet::new(&crate::key_ops::generate_key());
        assert!(matches!(
            other.decrypt(TOKEN),
            Err(CoreError::InvalidToken(_))
        ));
    }

    #[test]
    fn random_iv_makes_tokens_unique() {
        let f = fernet();
        let a = f.encrypt(b"same").unwrap();
        let b = f.encrypt(b"same").unwrap();
        assert_ne!(a, b);
        assert_eq!(f.decrypt(&a).unwrap(), b"same");
        assert_eq!(f.decrypt(&b).unwrap(), b"same");
    }
}
