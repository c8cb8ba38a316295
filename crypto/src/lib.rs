//! Cryptographic primitives for the Lumen client core.
//!
//! - **Ed25519** for signing and signature verification
//! - **SHA-512/256** for hashing (record digests, ids, checksums)
//! - Checksum-protected base32 text addresses
//! - 25-word mnemonic encoding of 32-byte seeds

pub mod address;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod sign;

pub use address::{
    base32_encode, decode_address, encode_address, is_valid_address, AddressError,
};
pub use hash::{digest, digest_multi};
pub use keys::{generate_keypair, keypair_from_secret_key, keypair_from_seed, KeyError};
pub use mnemonic::{
    master_derivation_key_from_mnemonic, mnemonic_from_master_derivation_key,
    mnemonic_from_seed, seed_from_mnemonic, MnemonicError,
};
pub use sign::{sign_bytes, sign_message, verify_bytes, verify_signature, BYTES_TAG};
