//! Partial signing and merging of encoded multisig transactions.
//!
//! A multisig transaction blob is the canonical encoding of
//! `{msig: {v, thr, subsig}, txn: <transaction record>}`. Blobs produced by
//! independent signers are folded together with `merge`, which is a pure
//! reduction: commutative, associative, and fatal on any inconsistency
//! between its inputs.

use crate::error::MultisigError;
use crate::preimage::MultisigPreimage;
use crate::signature::{MultisigSignature, Subsig};
use lumen_encoding::{decode, encode, Value};
use lumen_types::{tags, SecretKey};

/// Partially sign a transaction record for a multisig account.
///
/// The output blob carries the full preimage and exactly one filled
/// signature slot.
pub fn partial_sign_transaction(
    preimage: &MultisigPreimage,
    txn: &Value,
    secret: &SecretKey,
) -> Result<Vec<u8>, MultisigError> {
    let msig = MultisigSignature::partial(preimage, &signable_bytes(txn), secret)?;
    Ok(encode_blob(&msig, txn))
}

/// Merge independently produced multisig transaction blobs into one.
///
/// All inputs must agree on the preimage and on the transaction payload;
/// two different signatures in the same slot are fatal. Identical
/// duplicates are accepted, so merging is idempotent.
pub fn merge_multisig_transactions(blobs: &[Vec<u8>]) -> Result<Vec<u8>, MultisigError> {
    let first = blobs.first().ok_or(MultisigError::NoTransactions)?;
    let (mut merged, txn) = decode_blob(first)?;
    let reference_preimage = merged.preimage();
    let reference_txn_bytes = encode(&txn);

    for blob in &blobs[1..] {
        let (msig, other_txn) = decode_blob(blob)?;
        if msig.preimage() != reference_preimage {
            return Err(MultisigError::PreimageConflict);
        }
        if encode(&other_txn) != reference_txn_bytes {
            return Err(MultisigError::TransactionMismatch);
        }
        for (slot, incoming) in msig.subsigs.into_iter().enumerate() {
            merge_slot(&mut merged.subsigs[slot], incoming, slot)?;
        }
    }

    Ok(encode_blob(&merged, &txn))
}

/// Decode the transaction embedded in `blob`, partially sign it, and merge
/// the new signature into the blob.
///
/// The caller passes the preimage back in rather than trusting the blob's
/// own copy; a disagreement surfaces as `PreimageConflict` from the merge.
pub fn append_sign_multisig_transaction(
    blob: &[u8],
    preimage: &MultisigPreimage,
    secret: &SecretKey,
) -> Result<Vec<u8>, MultisigError> {
    let (_, txn) = decode_blob(blob)?;
    let partial = partial_sign_transaction(preimage, &txn, secret)?;
    merge_multisig_transactions(&[blob.to_vec(), partial])
}

/// The signable bytes of an embedded transaction record.
fn signable_bytes(txn: &Value) -> Vec<u8> {
    let record = encode(txn);
    let mut bytes = Vec::with_capacity(tags::TRANSACTION.len() + record.len());
    bytes.extend_from_slice(tags::TRANSACTION);
    bytes.extend_from_slice(&record);
    bytes
}

fn encode_blob(msig: &MultisigSignature, txn: &Value) -> Vec<u8> {
    encode(&Value::map(vec![
        ("msig", msig.to_value()),
        ("txn", txn.clone()),
    ]))
}

fn decode_blob(blob: &[u8]) -> Result<(MultisigSignature, Value), MultisigError> {
    let value = decode(blob)?;
    let msig = value
        .get("msig")
        .ok_or_else(|| MultisigError::MalformedBlob("missing msig".to_string()))?;
    let txn = value
        .get("txn")
        .ok_or_else(|| MultisigError::MalformedBlob("missing txn".to_string()))?;
    Ok((MultisigSignature::from_value(msig)?, txn.clone()))
}

fn merge_slot(current: &mut Subsig, incoming: Subsig, slot: usize) -> Result<(), MultisigError> {
    match (&current.sig, incoming.sig) {
        (Some(existing), Some(new)) if *existing != new => {
            Err(MultisigError::ConflictingSignature { slot })
        }
        (None, Some(new)) => {
            current.sig = Some(new);
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_crypto::{keypair_from_seed, verify_signature};
    use lumen_types::KeyPair;

    fn keypairs() -> Vec<KeyPair> {
        (0u8..3).map(|i| keypair_from_seed(&[i; 32])).collect()
    }

    fn preimage(kps: &[KeyPair]) -> MultisigPreimage {
        MultisigPreimage::new(1, 2, kps.iter().map(|kp| kp.public.clone()).collect())
    }

    fn sample_txn() -> Value {
        Value::map(vec![
            ("amt", Value::Uint(1000)),
            ("fee", Value::Uint(10)),
            ("fv", Value::Uint(51)),
            ("lv", Value::Uint(61)),
            ("rcv", Value::bytes(vec![7u8; 32])),
            ("snd", Value::bytes(vec![8u8; 32])),
            ("type", Value::str("pay")),
        ])
    }

    #[test]
    fn two_of_three_scenario() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let blob_a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let blob_b = partial_sign_transaction(&pre, &txn, &kps[1].secret).unwrap();
        let merged = merge_multisig_transactions(&[blob_a, blob_b]).unwrap();

        let (msig, embedded) = decode_blob(&merged).unwrap();
        assert_eq!(encode(&embedded), encode(&txn));
        assert_eq!(msig.signature_count(), 2);
        assert!(msig.subsigs[2].sig.is_none());

        let message = signable_bytes(&txn);
        for subsig in msig.subsigs.iter().take(2) {
            assert!(verify_signature(
                &message,
                subsig.sig.as_ref().unwrap(),
                &subsig.key
            ));
        }
    }

    #[test]
    fn merge_is_commutative() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let b = partial_sign_transaction(&pre, &txn, &kps[1].secret).unwrap();

        let ab = merge_multisig_transactions(&[a.clone(), b.clone()]).unwrap();
        let ba = merge_multisig_transactions(&[b, a]).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn stepwise_merge_equals_batch() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let b = partial_sign_transaction(&pre, &txn, &kps[1].secret).unwrap();
        let c = partial_sign_transaction(&pre, &txn, &kps[2].secret).unwrap();

        let batch = merge_multisig_transactions(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let step = merge_multisig_transactions(&[a, b]).unwrap();
        let step = merge_multisig_transactions(&[step, c]).unwrap();
        assert_eq!(batch, step);
    }

    #[test]
    fn merge_is_idempotent_on_duplicates() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let merged = merge_multisig_transactions(&[a.clone(), a.clone()]).unwrap();
        assert_eq!(merged, merge_multisig_transactions(&[a]).unwrap());
    }

    #[test]
    fn under_threshold_merge_is_accepted() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let merged = merge_multisig_transactions(&[a]).unwrap();
        let (msig, _) = decode_blob(&merged).unwrap();
        assert_eq!(msig.signature_count(), 1);
    }

    #[test]
    fn preimage_conflict_is_fatal() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let mut reordered_keys: Vec<_> = kps.iter().map(|kp| kp.public.clone()).collect();
        reordered_keys.swap(0, 1);
        let reordered = MultisigPreimage::new(1, 2, reordered_keys);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let b = partial_sign_transaction(&reordered, &txn, &kps[1].secret).unwrap();
        assert_eq!(
            merge_multisig_transactions(&[a, b]),
            Err(MultisigError::PreimageConflict)
        );
    }

    #[test]
    fn transaction_mismatch_is_fatal() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();
        let mut other = sample_txn();
        if let Value::Map(entries) = &mut other {
            entries[0].1 = Value::Uint(2000);
        }

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let b = partial_sign_transaction(&pre, &other, &kps[1].secret).unwrap();
        assert_eq!(
            merge_multisig_transactions(&[a, b]),
            Err(MultisigError::TransactionMismatch)
        );
    }

    #[test]
    fn conflicting_slot_signature_is_fatal() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        // Hand-corrupt the signature in a's filled slot to simulate tampering.
        let (mut msig, embedded) = decode_blob(&a).unwrap();
        let sig = msig.subsigs[0].sig.as_mut().unwrap();
        sig.0[0] ^= 0xFF;
        let tampered = encode_blob(&msig, &embedded);

        assert_eq!(
            merge_multisig_transactions(&[a, tampered]),
            Err(MultisigError::ConflictingSignature { slot: 0 })
        );
    }

    #[test]
    fn empty_merge_rejected() {
        assert_eq!(
            merge_multisig_transactions(&[]),
            Err(MultisigError::NoTransactions)
        );
    }

    #[test]
    fn append_sign_accumulates() {
        let kps = keypairs();
        let pre = preimage(&kps);
        let txn = sample_txn();

        let a = partial_sign_transaction(&pre, &txn, &kps[0].secret).unwrap();
        let ab = append_sign_multisig_transaction(&a, &pre, &kps[1].secret).unwrap();
        let (msig, _) = decode_blob(&ab).unwrap();
        assert_eq!(msig.signature_count(), 2);

        // appending matches a two-blob merge of the same signatures
        let b = partial_sign_transaction(&pre, &txn, &kps[1].secret).unwrap();
        assert_eq!(ab, merge_multisig_transactions(&[a, b]).unwrap());
    }
}
