//! Keyed hashing for sensitive field values.
//!
//! HMAC-SHA256 with truncated output gives stable, non-reversible tokens:
//! the same value hashed under the same key always yields the same token, so
//! records can still be correlated after redaction.

use crate::error::{Result, SanitizerError};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Default number of bytes to keep from HMAC output (16 hex chars).
pub const DEFAULT_TRUNCATION_BYTES: usize = 8;

/// Smallest accepted truncation.
pub const MIN_TRUNCATION_BYTES: usize = 4;

/// Largest accepted truncation (full SHA-256 output).
pub const MAX_TRUNCATION_BYTES: usize = 32;

/// Key identifier used when a sanitizer generates its own key.
pub const DEFAULT_KEY_ID: &str = "k1";

/// Key material for HMAC-SHA256.
#[derive(Clone)]
pub struct KeyMaterial {
    key: [u8; 32],
    /// Key identifier embedded in every hash token.
    pub key_id: String,
}

impl KeyMaterial {
    /// Create new key material with a random key.
    pub fn generate(key_id: &str) -> Result<Self> {
        let mut key = [0u8; 32];
        getrandom::getrandom(&mut key).map_err(|e| {
            SanitizerError::KeyError(format!("failed to generate random key: {}", e))
        })?;
        Ok(Self::from_bytes(key, key_id))
    }

    pub fn from_bytes(key: [u8; 32], key_id: &str) -> Self {
        Self {
            key,
            key_id: key_id.to_string(),
        }
    }

    /// Create key material from a base64-encoded 32-byte key.
    pub fn from_base64(encoded: &str, key_id: &str) -> Result<Self> {
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| SanitizerError::KeyError(format!("invalid base64: {}", e)))?;

        let key: [u8; 32] = decoded.as_slice().try_into().map_err(|_| {
            SanitizerError::KeyError(format!("key must be 32 bytes, got {}", decoded.len()))
        })?;

        Ok(Self::from_bytes(key, key_id))
    }

    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(self.key)
    }

    /// Hash `input` into a `[HASH:<key_id>:<hex>]` token.
    ///
    /// `truncation_bytes` is clamped to 4..=32.
    pub fn hash(&self, input: &str, truncation_bytes: usize) -> String {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(input.as_bytes());
        let digest = mac.finalize().into_bytes();

        let trunc = truncation_bytes.clamp(MIN_TRUNCATION_BYTES, MAX_TRUNCATION_BYTES);
        format!("[HASH:{}:{}]", self.key_id, hex::encode(&digest[..trunc]))
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_id", &self.key_id)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_stability() {
        let key = KeyMaterial::from_bytes([7u8; 32], "k1");
        assert_eq!(key.hash("secret123", 8), key.hash("secret123", 8));
    }

    #[test]
    fn test_hash_format() {
        let key = KeyMaterial::from_bytes([0u8; 32], "k1");
        let token = key.hash("secret123", 8);
        assert!(token.starts_with("[HASH:k1:"));
        assert!(token.ends_with(']'));
        assert_eq!(token.len(), "[HASH:k1:]".len() + 16);
    }

    #[test]
    fn test_truncation_is_clamped() {
        let key = KeyMaterial::from_bytes([0u8; 32], "k1");
        assert_eq!(key.hash("x", 1).len(), "[HASH:k1:]".len() + 8);
        assert_eq!(key.hash("x", 100).len(), "[HASH:k1:]".len() + 64);
    }

    #[test]
    fn test_different_keys_different_hashes() {
        let key1 = KeyMaterial::from_bytes([0u8; 32], "k1");
        let key2 = KeyMaterial::from_bytes([1u8; 32], "k1");
        assert_ne!(key1.hash("secret123", 8), key2.hash("secret123", 8));
    }

    #[test]
    fn test_base64_roundtrip() {
        let original = KeyMaterial::generate("k2").unwrap();
        let restored = KeyMaterial::from_base64(&original.to_base64(), "k2").unwrap();
        assert_eq!(original.hash("value", 8), restored.hash("value", 8));
    }

    #[test]
    fn test_base64_wrong_length() {
        let err = KeyMaterial::from_base64("c2hvcnQ=", "k1").unwrap_err();
        assert!(matches!(err, SanitizerError::KeyError(_)));
        let err = KeyMaterial::from_base64("not base64!!", "k1").unwrap_err();
        assert!(matches!(err, SanitizerError::KeyError(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = KeyMaterial::from_bytes([9u8; 32], "k1");
        let debug = format!("{:?}", key);
        assert!(debug.contains("k1"));
        assert!(!debug.contains("9, 9"));
    }
}
