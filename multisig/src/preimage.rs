//! Multisig account preimage and address derivation.

use lumen_crypto::{digest, encode_address};
use lumen_types::{tags, PublicKey};

/// The identity of a multisig account: version, threshold, and an ordered
/// list of participant public keys.
///
/// Key order is part of the identity — the same keys in a different order
/// derive a different address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigPreimage {
    pub version: u8,
    pub threshold: u8,
    pub public_keys: Vec<PublicKey>,
}

impl MultisigPreimage {
    pub fn new(version: u8, threshold: u8, public_keys: Vec<PublicKey>) -> Self {
        Self {
            version,
            threshold,
            public_keys,
        }
    }

    /// The 32-byte account identity derived from the tagged preimage bytes.
    pub fn derived_public_key(&self) -> PublicKey {
        let mut bytes = Vec::with_capacity(
            tags::MULTISIG_ADDR.len() + 2 + self.public_keys.len() * 32,
        );
        bytes.extend_from_slice(tags::MULTISIG_ADDR);
        bytes.push(self.version);
        bytes.push(self.threshold);
        for key in &self.public_keys {
            bytes.extend_from_slice(key.as_bytes());
        }
        PublicKey(digest(&bytes))
    }

    /// The checksum-protected text address of this multisig account.
    pub fn address(&self) -> String {
        encode_address(&self.derived_public_key())
    }

    /// Index of a participant key, if present.
    pub fn position_of(&self, key: &PublicKey) -> Option<usize> {
        self.public_keys.iter().position(|k| k == key)
    }
}
