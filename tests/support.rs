// tests/support.rs
//! Test fixtures — keys, key sources and artifact helpers

use fernet_crypt::key_ops::{generate_key, StaticKeySource};

/// Published Fernet test vector
#[allow(dead_code)]
pub const VECTOR_SECRET: &str = "cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=";
#[allow(dead_code)]
pub const VECTOR_TOKEN: &str = "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==";

/// `encrypt(b"Hello World", "pw123")` from the reference Fernet tool with
/// salt 00..0f, IV 00..0f and timestamp 499162800
#[allow(dead_code)]
pub const PASSWORD_ARTIFACT_HEX: &str = concat!(
    "000102030405060708090a0b0c0d0e0f",
    "6741414141414164774a367741414543417751464267634943516f4c4441304f",
    "447a5a7268346b4e7a367a7a787256324f5f725a4554626e3863494145512d71",
    "515579394f6a7879427978654d66714d5965663146746279744469324f4f4e31",
    "54773d3d"
);

/// Key source backed by a fresh random key
#[allow(dead_code)]
pub fn fixed_source() -> StaticKeySource {
    StaticKeySource::from_key(&generate_key())
}

/// Copy of `artifact` with the low bit of one byte flipped
#[allow(dead_code)]
pub fn flip_byte(artifact: &[u8], index: usize) -> Vec<u8> {
    let mut tampered = artifact.to_vec();
    tampered[index] ^= 0x01;
    tampered
}
