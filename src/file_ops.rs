// src/file_ops.rs
//! File-level encryption/decryption operations
//!
//! Builds on the in-memory codec from `crypto`. Outputs are written to a
//! temporary file in the destination directory and renamed into place, so a
//! failed run never leaves a half-written artifact behind.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::consts::{DECRYPTED_EXTENSION, ENCRYPTED_EXTENSION};
use crate::crypto::{decrypt_to_vec, decrypt_to_vec_with_ttl, encrypt_to_vec};
use crate::error::CoreError;
use crate::key_ops::{KeyMode, KeySource};

/// `notes.txt` → `notes.txt.enc`
pub fn encrypted_path_for<P: AsRef<Path>>(input: P) -> PathBuf {
    append_extension(input.as_ref(), ENCRYPTED_EXTENSION)
}

/// `notes.txt.enc` → `notes.txt`, anything else gets `.dec` appended
pub fn decrypted_path_for<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    match input.extension() {
        Some(ext) if ext == ENCRYPTED_EXTENSION => input.with_extension(""),
        _ => append_extension(input, DECRYPTED_EXTENSION),
    }
}

pub(crate) fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Encrypt a file on disk
///
/// Reads the plaintext file, encrypts it in-memory, writes the raw artifact.
/// Returns the artifact that was written.
pub fn encrypt_file<P, Q, S>(
    input_path: P,
    output_path: Q,
    mode: &KeyMode,
    source: &S,
) -> Result<Vec<u8>, CoreError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: KeySource + ?Sized,
{
    let plaintext = zeroize::Zeroizing::new(std::fs::read(input_path.as_ref())?);
    let artifact = encrypt_to_vec(&plaintext, mode, source)?;
    write_atomic(output_path.as_ref(), &artifact)?;

    tracing::info!(
        input = %input_path.as_ref().display(),
        output = %output_path.as_ref().display(),
        "encrypted file"
    );
    Ok(artifact)
}

/// Decrypt an artifact file on disk
///
/// Returns the plaintext size in bytes.
pub fn decrypt_file<P, Q, S>(
    input_path: P,
    output_path: Q,
    mode: &KeyMode,
    source: &S,
    ttl: Option<Duration>,
) -> Result<u64, CoreError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: KeySource + ?Sized,
{
    let artifact = std::fs::read(input_path.as_ref())?;
    let plaintext = match ttl {
        Some(ttl) => decrypt_to_vec_with_ttl(&artifact, mode, source, ttl)?,
        None => decrypt_to_vec(&artifact, mode, source)?,
    };
    write_atomic(output_path.as_ref(), plaintext.expose_secret())?;

    tracing::info!(
        input = %input_path.as_ref().display(),
        output = %output_path.as_ref().display(),
        "decrypted file"
    );
    Ok(plaintext.expose_secret().len() as u64)
}

/// Write `bytes` to `path` via a sibling temp file + rename
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| CoreError::Io(e.error))?;
    Ok(())
}
