//! Transaction, bid, and arbitrary-byte signing.

use lumen_crypto::{decode_address, keypair_from_seed};
use lumen_transactions::{Bid, Transaction, TransactionError};
use lumen_types::{Address, SecretKey, Signature};

/// A signed transaction ready for submission: its id plus the encoded blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_id: String,
    pub blob: Vec<u8>,
}

/// Sign a transaction with a secret key.
///
/// An unset sender is filled in from the key; a sender that is set but does
/// not match the key fails with `SenderKeyMismatch`.
pub fn sign_transaction(
    txn: &mut Transaction,
    secret: &SecretKey,
) -> Result<SignedTransaction, TransactionError> {
    if txn.sender.is_zero() {
        let keypair = keypair_from_seed(&secret.seed());
        txn.sender = Address::from(&keypair.public);
    }
    let blob = txn.sign(secret)?;
    Ok(SignedTransaction {
        tx_id: txn.id(),
        blob,
    })
}

/// Sign an auction bid, returning the encoded `{sig, bid}` blob (typically
/// placed in a transaction note).
pub fn sign_bid(bid: &Bid, secret: &SecretKey) -> Result<Vec<u8>, TransactionError> {
    bid.sign(secret)
}

/// Sign arbitrary bytes under the byte-payload domain tag.
pub fn sign_bytes(bytes: &[u8], secret: &SecretKey) -> Signature {
    lumen_crypto::sign_bytes(bytes, secret)
}

/// Verify a `sign_bytes` signature against a text address.
///
/// Returns `false` for malformed addresses rather than failing: the
/// signature cannot be valid for an account that does not exist.
pub fn verify_bytes(bytes: &[u8], signature: &Signature, address: &str) -> bool {
    match decode_address(address) {
        Ok(public) => lumen_crypto::verify_bytes(bytes, signature, &public),
        Err(_) => false,
    }
}
