//! Hashing utilities for manifest fingerprints.
//!
//! This module provides:
//! - `Fingerprint`: the full 64-character checksum embedded in generated code
//! - `Fingerprintable`: fingerprinting of any serializable value
//! - `hash_bytes()`: arbitrary byte hashing

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub type HashError = serde_json::Error;

/// A full 64-character SHA-256 hash of a manifest.
///
/// The fingerprint doubles as a cache key for regeneration and as the value
/// returned by the generated checksum accessor, which hosts compare against a
/// stored value to detect manifest changes.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Values that can be fingerprinted.
///
/// The fingerprint is the SHA-256 of the compact JSON serialization. Object
/// keys are hashed in insertion order and never sorted, so the same document
/// always yields the same checksum and reordering keys yields a new one.
pub trait Fingerprintable: Serialize {
  fn fingerprint(&self) -> Result<Fingerprint, HashError> {
    let serialized = serde_json::to_string(self)?;
    Ok(hash_bytes(serialized.as_bytes()))
  }
}

impl Fingerprintable for serde_json::Map<String, serde_json::Value> {}

impl Fingerprintable for serde_json::Value {}

/// Hash arbitrary bytes.
///
/// Returns the full 64-character SHA256 hash.
pub fn hash_bytes(data: &[u8]) -> Fingerprint {
  let mut hasher = Sha256::new();
  hasher.update(data);
  Fingerprint(hex::encode(hasher.finalize()))
}
