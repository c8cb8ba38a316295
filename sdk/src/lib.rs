//! High-level facade over the Lumen client core.
//!
//! Everything a client application needs in one place:
//! - account generation and mnemonic import/export
//! - transaction, bid, and arbitrary-byte signing
//! - multisig address derivation, partial signing, append-signing, merging
//! - logic-signature construction and transaction signing
//! - group-commitment computation and assignment
//! - canonical record encode/decode and unit conversion
//!
//! Node submission lives in `lumen-client`; this crate never performs I/O.

pub mod account;
pub mod multisig;
pub mod transact;

pub use account::{
    generate_account, mnemonic_to_secret_key, secret_key_to_mnemonic, Account,
};
pub use multisig::{
    append_sign_multisig_transaction, merge_multisig_transactions, multisig_address,
    sign_multisig_transaction,
};
pub use transact::{sign_bid, sign_bytes, sign_transaction, verify_bytes, SignedTransaction};

// The lower layers are part of the public surface; callers should not need
// to name the internal crates for common flows.
pub use lumen_crypto::{
    is_valid_address, master_derivation_key_from_mnemonic, mnemonic_from_master_derivation_key,
};
pub use lumen_encoding::{decode as decode_record, encode as encode_record, Value};
pub use lumen_multisig::{MultisigPreimage, MultisigSignature};
pub use lumen_transactions::{
    assign_group_id, compute_group_id, sign_logic_sig_transaction, verify_signed_bid, Bid,
    LogicSig, Transaction, TransactionError, TxPayload,
};
pub use lumen_types::{
    lumens_to_microlumens, microlumens_to_lumens, Address, AmountError, GroupId, KeyPair,
    PublicKey, SecretKey, Signature, TxId,
};
