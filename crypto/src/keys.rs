//! Ed25519 key generation and derivation.

use ed25519_dalek::SigningKey;
use lumen_types::{KeyPair, PublicKey, SecretKey};
use rand::rngs::OsRng;
use thiserror::Error;

/// Errors arising from malformed key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
}

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        secret: SecretKey(signing_key.to_keypair_bytes()),
    }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        secret: SecretKey(signing_key.to_keypair_bytes()),
    }
}

/// Reconstruct a full key pair from 64-byte secret-key material
/// (seed followed by public key).
///
/// Fails with `InvalidKeyMaterial` on wrong length or when the embedded
/// public key does not match the seed.
pub fn keypair_from_secret_key(secret: &[u8]) -> Result<KeyPair, KeyError> {
    let bytes: [u8; 64] = secret.try_into().map_err(|_| {
        KeyError::InvalidKeyMaterial(format!("expected 64 bytes, got {}", secret.len()))
    })?;
    let signing_key = SigningKey::from_keypair_bytes(&bytes)
        .map_err(|e| KeyError::InvalidKeyMaterial(e.to_string()))?;
    let verifying_key = signing_key.verifying_key();
    Ok(KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        secret: SecretKey(bytes),
    })
}
