//! Account address: the raw 32-byte public key identity.
//!
//! The checksum-protected base32 text form lives in `lumen_crypto::address`;
//! this type is the logical identity carried inside records. An all-zero
//! address means "not yet set" — the canonical encoding omits zero values, so
//! an unset sender simply never appears on the wire.

use crate::keys::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte account address (the raw public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const ZERO: Self = Self([0u8; 32]);
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl From<&PublicKey> for Address {
    fn from(public: &PublicKey) -> Self {
        Self(public.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..4]))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1u8; 32]).is_zero());
    }

    #[test]
    fn from_public_key() {
        let pk = PublicKey([9u8; 32]);
        let addr = Address::from(&pk);
        assert_eq!(addr.as_bytes(), pk.as_bytes());
    }
}
