//! The accumulated multisig signature structure.

use crate::error::MultisigError;
use crate::preimage::MultisigPreimage;
use lumen_crypto::{keypair_from_seed, sign_message, verify_signature};
use lumen_encoding::Value;
use lumen_types::{PublicKey, SecretKey, Signature};

/// One signature slot, aligned with the preimage's key list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subsig {
    pub key: PublicKey,
    pub sig: Option<Signature>,
}

/// A multisig signature: the preimage metadata plus one slot per
/// participant key, each empty or holding that signer's signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigSignature {
    pub version: u8,
    pub threshold: u8,
    pub subsigs: Vec<Subsig>,
}

impl MultisigSignature {
    /// Sign `message` with one participant key, producing a signature with
    /// exactly one filled slot.
    ///
    /// Fails with `UnknownSigner` when the secret key's public half is not
    /// part of the preimage.
    pub fn partial(
        preimage: &MultisigPreimage,
        message: &[u8],
        secret: &SecretKey,
    ) -> Result<Self, MultisigError> {
        let keypair = keypair_from_seed(&secret.seed());
        let index = preimage
            .position_of(&keypair.public)
            .ok_or(MultisigError::UnknownSigner)?;

        let mut subsigs: Vec<Subsig> = preimage
            .public_keys
            .iter()
            .map(|key| Subsig {
                key: key.clone(),
                sig: None,
            })
            .collect();
        subsigs[index].sig = Some(sign_message(message, secret));

        Ok(Self {
            version: preimage.version,
            threshold: preimage.threshold,
            subsigs,
        })
    }

    /// Sign `message` and fill this signer's slot in place.
    ///
    /// An already-filled slot with a different signature is a conflict, not
    /// a last-write-wins overwrite; re-signing with the same key is a no-op.
    pub fn append(&mut self, message: &[u8], secret: &SecretKey) -> Result<(), MultisigError> {
        let keypair = keypair_from_seed(&secret.seed());
        let index = self
            .subsigs
            .iter()
            .position(|s| s.key == keypair.public)
            .ok_or(MultisigError::UnknownSigner)?;

        let sig = sign_message(message, secret);
        match &self.subsigs[index].sig {
            Some(existing) if *existing != sig => {
                return Err(MultisigError::ConflictingSignature { slot: index });
            }
            _ => self.subsigs[index].sig = Some(sig),
        }
        Ok(())
    }

    /// Reconstruct the preimage this signature was built from.
    pub fn preimage(&self) -> MultisigPreimage {
        MultisigPreimage::new(
            self.version,
            self.threshold,
            self.subsigs.iter().map(|s| s.key.clone()).collect(),
        )
    }

    /// Number of filled slots.
    pub fn signature_count(&self) -> usize {
        self.subsigs.iter().filter(|s| s.sig.is_some()).count()
    }

    /// Verify this multisig signature over `message` for the account
    /// `expected`: the derived preimage address must match, at least
    /// `threshold` slots must be filled, and every filled slot must verify
    /// under its own key.
    pub fn verify(&self, message: &[u8], expected: &PublicKey) -> bool {
        if self.threshold == 0 || self.subsigs.is_empty() {
            return false;
        }
        if &self.preimage().derived_public_key() != expected {
            return false;
        }
        if self.signature_count() < self.threshold as usize {
            return false;
        }
        self.subsigs
            .iter()
            .filter_map(|s| s.sig.as_ref().map(|sig| (sig, &s.key)))
            .all(|(sig, key)| verify_signature(message, sig, key))
    }

    /// The canonical record form: `{v, thr, subsig: [{pk, s?}…]}`.
    pub fn to_value(&self) -> Value {
        let slots: Vec<Value> = self
            .subsigs
            .iter()
            .map(|s| {
                let mut entries = vec![("pk", Value::bytes(s.key.as_bytes().to_vec()))];
                if let Some(sig) = &s.sig {
                    entries.push(("s", Value::bytes(sig.as_bytes().to_vec())));
                }
                Value::map(entries)
            })
            .collect();
        Value::map(vec![
            ("subsig", Value::Array(slots)),
            ("thr", Value::Uint(self.threshold as u64)),
            ("v", Value::Uint(self.version as u64)),
        ])
    }

    /// Rebuild from a decoded record, validating slot shapes and lengths.
    pub fn from_value(value: &Value) -> Result<Self, MultisigError> {
        let malformed = |what: &str| MultisigError::MalformedBlob(what.to_string());

        let version = value
            .get("v")
            .and_then(Value::as_uint)
            .ok_or_else(|| malformed("missing version"))?;
        let threshold = value
            .get("thr")
            .and_then(Value::as_uint)
            .ok_or_else(|| malformed("missing threshold"))?;
        let slots = value
            .get("subsig")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("missing subsig list"))?;

        let mut subsigs = Vec::with_capacity(slots.len());
        for slot in slots {
            let key: [u8; 32] = slot
                .get("pk")
                .and_then(Value::as_bytes)
                .and_then(|b| b.try_into().ok())
                .ok_or_else(|| malformed("subsig key must be 32 bytes"))?;
            let sig = match slot.get("s") {
                None => None,
                Some(v) => {
                    let bytes: [u8; 64] = v
                        .as_bytes()
                        .and_then(|b| b.try_into().ok())
                        .ok_or_else(|| malformed("subsig signature must be 64 bytes"))?;
                    Some(Signature(bytes))
                }
            };
            subsigs.push(Subsig {
                key: PublicKey(key),
                sig,
            });
        }

        Ok(Self {
            version: u8::try_from(version).map_err(|_| malformed("version out of range"))?,
            threshold: u8::try_from(threshold).map_err(|_| malformed("threshold out of range"))?,
            subsigs,
        })
    }
}
