// src/aliases.rs
//! Secret-holding types built on secure-gate
//!
//! Everything here redacts itself in `Debug` output and zeroizes on drop.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(FernetKey32, 32); // 16-byte signing key || 16-byte AES-128 key

// Dynamic secrets
dynamic_alias!(Password, String); // User-supplied password for PBKDF2
dynamic_alias!(PlainText, Vec<u8>); // Decrypted message bytes
dynamic_alias!(EncodedKey, Vec<u8>); // Raw contents of the external key source
