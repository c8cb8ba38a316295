//! Ed25519 message signing and verification.
//!
//! `sign_message`/`verify_signature` operate on raw bytes; the record
//! builders prepend their own domain tags before calling in. Arbitrary
//! caller-supplied payloads go through `sign_bytes`/`verify_bytes`, which
//! apply the `MX` tag so such signatures can never collide with a
//! transaction, bid, or program signature.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use lumen_types::{tags, PublicKey, SecretKey, Signature};

/// Domain tag for arbitrary byte payloads.
pub const BYTES_TAG: &[u8] = tags::BYTES;

/// Sign a message with a secret key, returning the 64-byte signature.
pub fn sign_message(message: &[u8], secret: &SecretKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&secret.seed());
    let sig = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
pub fn verify_signature(message: &[u8], signature: &Signature, public: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

/// Sign an arbitrary byte payload under the `MX` domain tag.
pub fn sign_bytes(bytes: &[u8], secret: &SecretKey) -> Signature {
    let mut tagged = Vec::with_capacity(BYTES_TAG.len() + bytes.len());
    tagged.extend_from_slice(BYTES_TAG);
    tagged.extend_from_slice(bytes);
    sign_message(&tagged, secret)
}

/// Verify a signature produced by `sign_bytes`.
pub fn verify_bytes(bytes: &[u8], signature: &Signature, public: &PublicKey) -> bool {
    let mut tagged = Vec::with_capacity(BYTES_TAG.len() + bytes.len());
    tagged.extend_from_slice(BYTES_TAG);
    tagged.extend_from_slice(bytes);
    verify_signature(&tagged, signature, public)
}
