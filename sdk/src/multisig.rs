//! Multisig operations over typed transactions.
//!
//! The engine itself (`lumen-multisig`) works on canonical records; these
//! wrappers add the sender bookkeeping a caller expects when working with
//! typed transactions.

use crate::transact::SignedTransaction;
use lumen_multisig::{self as engine, MultisigError, MultisigPreimage};
use lumen_transactions::Transaction;
use lumen_types::{Address, SecretKey};

/// The text address of a multisig account.
pub fn multisig_address(preimage: &MultisigPreimage) -> String {
    preimage.address()
}

/// Partially sign a transaction for a multisig account.
///
/// An unset sender is filled in with the account's derived address; a
/// sender that is set but differs from it fails with `BadSender` —
/// partially signing a transaction that spends from some other account
/// would accumulate worthless signatures.
pub fn sign_multisig_transaction(
    txn: &mut Transaction,
    preimage: &MultisigPreimage,
    secret: &SecretKey,
) -> Result<SignedTransaction, MultisigError> {
    let derived = Address::new(*preimage.derived_public_key().as_bytes());
    if txn.sender.is_zero() {
        txn.sender = derived;
    } else if txn.sender != derived {
        return Err(MultisigError::BadSender);
    }

    let blob = engine::partial_sign_transaction(preimage, &txn.to_value(), secret)?;
    Ok(SignedTransaction {
        tx_id: txn.id(),
        blob,
    })
}

/// Decode the transaction inside `blob`, add this signer's signature, and
/// merge the result with the original blob.
pub fn append_sign_multisig_transaction(
    blob: &[u8],
    preimage: &MultisigPreimage,
    secret: &SecretKey,
) -> Result<SignedTransaction, MultisigError> {
    let merged = engine::append_sign_multisig_transaction(blob, preimage, secret)?;
    Ok(SignedTransaction {
        tx_id: embedded_tx_id(&merged)?,
        blob: merged,
    })
}

/// Merge independently produced multisig blobs into one.
pub fn merge_multisig_transactions(blobs: &[Vec<u8>]) -> Result<Vec<u8>, MultisigError> {
    engine::merge_multisig_transactions(blobs)
}

/// The id of the transaction embedded in a multisig blob.
fn embedded_tx_id(blob: &[u8]) -> Result<String, MultisigError> {
    let value = lumen_encoding::decode(blob)?;
    let txn_value = value
        .get("txn")
        .ok_or_else(|| MultisigError::MalformedBlob("missing txn".to_string()))?;
    let txn = Transaction::from_value(txn_value)
        .map_err(|e| MultisigError::MalformedBlob(e.to_string()))?;
    Ok(txn.id())
}
