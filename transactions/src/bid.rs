//! Auction bid records.
//!
//! A signed bid is not submitted on its own; the encoded `{sig, bid}` blob
//! travels inside a transaction's note field.

use crate::error::TransactionError;
use lumen_crypto::{keypair_from_seed, sign_message, verify_signature};
use lumen_encoding::{decode, encode, Value};
use lumen_types::{tags, Address, SecretKey, Signature};

/// An auction bid record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bid {
    pub bidder: Address,
    pub auction_key: Address,
    pub bid_amount: u64,
    pub max_price: u64,
    pub bid_id: u64,
    pub auction_id: u64,
}

impl Bid {
    /// The canonical record form with the protocol's field names.
    pub fn to_value(&self) -> Value {
        Value::map(vec![
            ("aid", Value::Uint(self.auction_id)),
            ("auc", Value::bytes(self.auction_key.as_bytes().to_vec())),
            ("bidder", Value::bytes(self.bidder.as_bytes().to_vec())),
            ("cur", Value::Uint(self.bid_amount)),
            ("id", Value::Uint(self.bid_id)),
            ("price", Value::Uint(self.max_price)),
        ])
    }

    /// Rebuild a bid from a decoded record.
    pub fn from_value(value: &Value) -> Result<Self, TransactionError> {
        let bytes32 = |key: &str| -> Result<[u8; 32], TransactionError> {
            match value.get(key) {
                None => Ok([0u8; 32]),
                Some(v) => v.as_bytes().and_then(|b| b.try_into().ok()).ok_or_else(|| {
                    TransactionError::MalformedRecord(format!("{key} must be 32 bytes"))
                }),
            }
        };
        let uint = |key: &str| value.get(key).and_then(Value::as_uint).unwrap_or(0);

        Ok(Self {
            bidder: Address::new(bytes32("bidder")?),
            auction_key: Address::new(bytes32("auc")?),
            bid_amount: uint("cur"),
            max_price: uint("price"),
            bid_id: uint("id"),
            auction_id: uint("aid"),
        })
    }

    /// The exact bytes that get signed: tag plus canonical record.
    pub fn signable_bytes(&self) -> Vec<u8> {
        let record = encode(&self.to_value());
        let mut bytes = Vec::with_capacity(tags::BID.len() + record.len());
        bytes.extend_from_slice(tags::BID);
        bytes.extend_from_slice(&record);
        bytes
    }

    /// Sign the bid, producing the encoded `{sig, bid}` blob.
    ///
    /// The declared bidder must match the signing key's address.
    pub fn sign(&self, secret: &SecretKey) -> Result<Vec<u8>, TransactionError> {
        let keypair = keypair_from_seed(&secret.seed());
        if self.bidder != Address::from(&keypair.public) {
            return Err(TransactionError::SenderKeyMismatch);
        }
        let sig = sign_message(&self.signable_bytes(), secret);
        Ok(encode(&Value::map(vec![
            ("bid", self.to_value()),
            ("sig", Value::bytes(sig.as_bytes().to_vec())),
        ])))
    }
}

/// Verify a signed-bid blob: the embedded signature must validate under the
/// embedded bidder key over the bid's signable bytes.
pub fn verify_signed_bid(blob: &[u8]) -> Result<bool, TransactionError> {
    let value = decode(blob)?;
    let bid = Bid::from_value(
        value
            .get("bid")
            .ok_or_else(|| TransactionError::MalformedRecord("missing bid".to_string()))?,
    )?;
    let sig_bytes: [u8; 64] = value
        .get("sig")
        .and_then(Value::as_bytes)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| TransactionError::MalformedRecord("signature must be 64 bytes".to_string()))?;

    let public = lumen_types::PublicKey(*bid.bidder.as_bytes());
    Ok(verify_signature(
        &bid.signable_bytes(),
        &Signature(sig_bytes),
        &public,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_crypto::keypair_from_seed;

    fn sample_bid(bidder: Address) -> Bid {
        Bid {
            bidder,
            auction_key: Address::new([4u8; 32]),
            bid_amount: 1_000_000,
            max_price: 60,
            bid_id: 2,
            auction_id: 56,
        }
    }

    #[test]
    fn value_roundtrip() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let bid = sample_bid(Address::from(&kp.public));
        assert_eq!(Bid::from_value(&bid.to_value()).unwrap(), bid);
    }

    #[test]
    fn sign_and_verify() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let bid = sample_bid(Address::from(&kp.public));
        let blob = bid.sign(&kp.secret).unwrap();
        assert!(verify_signed_bid(&blob).unwrap());
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let bid = sample_bid(Address::from(&kp.public));
        assert_eq!(bid.sign(&kp.secret).unwrap(), bid.sign(&kp.secret).unwrap());
    }

    #[test]
    fn wrong_bidder_rejected() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let other = keypair_from_seed(&[2u8; 32]);
        let bid = sample_bid(Address::from(&kp.public));
        assert_eq!(
            bid.sign(&other.secret),
            Err(TransactionError::SenderKeyMismatch)
        );
    }

    #[test]
    fn tampered_blob_fails_verification() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let bid = sample_bid(Address::from(&kp.public));
        let blob = bid.sign(&kp.secret).unwrap();

        let mut value = decode(&blob).unwrap();
        if let Value::Map(entries) = &mut value {
            for (key, val) in entries.iter_mut() {
                if key == "bid" {
                    if let Value::Map(bid_entries) = val {
                        for (bid_key, bid_val) in bid_entries.iter_mut() {
                            if bid_key == "cur" {
                                *bid_val = Value::Uint(2_000_000);
                            }
                        }
                    }
                }
            }
        }
        let tampered = encode(&value);
        assert!(!verify_signed_bid(&tampered).unwrap());
    }
}
