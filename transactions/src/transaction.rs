//! Transaction records and signing.

use crate::error::TransactionError;
use lumen_crypto::{base32_encode, digest, keypair_from_seed, sign_message};
use lumen_encoding::{encode, Value};
use lumen_types::{tags, Address, GroupId, SecretKey, TxId};

/// The type-specific half of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxPayload {
    /// Move microlumens from the sender to a receiver, optionally closing
    /// the sender's remainder out to a third account.
    Payment {
        receiver: Address,
        amount: u64,
        close_remainder_to: Address,
    },
    /// Register participation keys for consensus.
    KeyRegistration {
        vote_key: [u8; 32],
        selection_key: [u8; 32],
        vote_first: u64,
        vote_last: u64,
        vote_key_dilution: u64,
    },
}

impl TxPayload {
    fn type_str(&self) -> &'static str {
        match self {
            TxPayload::Payment { .. } => "pay",
            TxPayload::KeyRegistration { .. } => "keyreg",
        }
    }
}

/// A transaction record.
///
/// Constructed from caller-supplied fields, optionally group-assigned, then
/// signed; the signed blob is immutable. A zero `sender` means "not yet
/// set" (the canonical encoding omits it), which the multisig signing path
/// uses to fill in the derived account address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub sender: Address,
    pub fee: u64,
    pub first_round: u64,
    pub last_round: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    pub note: Vec<u8>,
    pub group: GroupId,
    pub payload: TxPayload,
}

impl Transaction {
    /// The canonical record form with the protocol's field names.
    pub fn to_value(&self) -> Value {
        let mut entries = vec![
            ("fee", Value::Uint(self.fee)),
            ("fv", Value::Uint(self.first_round)),
            ("gen", Value::str(self.genesis_id.clone())),
            ("gh", Value::bytes(self.genesis_hash.to_vec())),
            ("grp", Value::bytes(self.group.as_bytes().to_vec())),
            ("lv", Value::Uint(self.last_round)),
            ("note", Value::bytes(self.note.clone())),
            ("snd", Value::bytes(self.sender.as_bytes().to_vec())),
            ("type", Value::str(self.payload.type_str())),
        ];
        match &self.payload {
            TxPayload::Payment {
                receiver,
                amount,
                close_remainder_to,
            } => {
                entries.push(("amt", Value::Uint(*amount)));
                entries.push(("close", Value::bytes(close_remainder_to.as_bytes().to_vec())));
                entries.push(("rcv", Value::bytes(receiver.as_bytes().to_vec())));
            }
            TxPayload::KeyRegistration {
                vote_key,
                selection_key,
                vote_first,
                vote_last,
                vote_key_dilution,
            } => {
                entries.push(("selkey", Value::bytes(selection_key.to_vec())));
                entries.push(("votefst", Value::Uint(*vote_first)));
                entries.push(("votekd", Value::Uint(*vote_key_dilution)));
                entries.push(("votekey", Value::bytes(vote_key.to_vec())));
                entries.push(("votelst", Value::Uint(*vote_last)));
            }
        }
        Value::map(entries)
    }

    /// Rebuild a transaction from a decoded record.
    pub fn from_value(value: &Value) -> Result<Self, TransactionError> {
        let malformed = |what: &str| TransactionError::MalformedRecord(what.to_string());

        let type_str = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing transaction type"))?;

        let payload = match type_str {
            "pay" => TxPayload::Payment {
                receiver: Address::new(bytes32_field(value, "rcv")?),
                amount: uint_field(value, "amt"),
                close_remainder_to: Address::new(bytes32_field(value, "close")?),
            },
            "keyreg" => TxPayload::KeyRegistration {
                vote_key: bytes32_field(value, "votekey")?,
                selection_key: bytes32_field(value, "selkey")?,
                vote_first: uint_field(value, "votefst"),
                vote_last: uint_field(value, "votelst"),
                vote_key_dilution: uint_field(value, "votekd"),
            },
            other => return Err(malformed(&format!("unknown transaction type {other:?}"))),
        };

        Ok(Self {
            sender: Address::new(bytes32_field(value, "snd")?),
            fee: uint_field(value, "fee"),
            first_round: uint_field(value, "fv"),
            last_round: uint_field(value, "lv"),
            genesis_id: value
                .get("gen")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            genesis_hash: bytes32_field(value, "gh")?,
            note: value
                .get("note")
                .and_then(Value::as_bytes)
                .unwrap_or_default()
                .to_vec(),
            group: GroupId::new(bytes32_field(value, "grp")?),
            payload,
        })
    }

    /// The exact bytes that get hashed and signed: tag plus canonical record.
    pub fn signable_bytes(&self) -> Vec<u8> {
        let record = encode(&self.to_value());
        let mut bytes = Vec::with_capacity(tags::TRANSACTION.len() + record.len());
        bytes.extend_from_slice(tags::TRANSACTION);
        bytes.extend_from_slice(&record);
        bytes
    }

    /// The raw 32-byte transaction id.
    pub fn raw_id(&self) -> TxId {
        TxId::new(digest(&self.signable_bytes()))
    }

    /// The user-facing transaction id: checksum-free base32 of `raw_id`.
    pub fn id(&self) -> String {
        base32_encode(self.raw_id().as_bytes())
    }

    /// Sign the record, producing the encoded `{sig, txn}` blob.
    ///
    /// The declared sender must match the signing key's address; a silent
    /// overwrite here would let a caller sign someone else's record.
    pub fn sign(&self, secret: &SecretKey) -> Result<Vec<u8>, TransactionError> {
        let keypair = keypair_from_seed(&secret.seed());
        if self.sender != Address::from(&keypair.public) {
            return Err(TransactionError::SenderKeyMismatch);
        }
        let sig = sign_message(&self.signable_bytes(), secret);
        Ok(encode(&Value::map(vec![
            ("sig", Value::bytes(sig.as_bytes().to_vec())),
            ("txn", self.to_value()),
        ])))
    }
}

/// Read an optional uint field, defaulting to zero (omitted on the wire).
fn uint_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_uint).unwrap_or(0)
}

/// Read an optional 32-byte field, defaulting to all zeros (omitted on the
/// wire). A present field of any other length is malformed.
fn bytes32_field(value: &Value, key: &str) -> Result<[u8; 32], TransactionError> {
    match value.get(key) {
        None => Ok([0u8; 32]),
        Some(v) => v
            .as_bytes()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| TransactionError::MalformedRecord(format!("{key} must be 32 bytes"))),
    }
}
