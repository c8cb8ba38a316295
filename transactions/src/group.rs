//! Transaction-group commitments.
//!
//! A group commitment binds an ordered batch of transactions together: the
//! node accepts the batch atomically or not at all. The commitment is a
//! hash over the ordered list of raw transaction ids, so input order is
//! significant and must be preserved exactly.

use crate::error::TransactionError;
use crate::transaction::Transaction;
use lumen_crypto::{digest, encode_address};
use lumen_encoding::{encode, Value};
use lumen_types::{tags, GroupId, PublicKey, TxId};

/// Maximum number of transactions in one group.
pub const MAX_GROUP_SIZE: usize = 16;

/// The ordered list of raw transaction ids a group commitment is computed
/// over. Not persisted beyond the computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxGroup {
    pub tx_ids: Vec<TxId>,
}

impl TxGroup {
    pub fn new(tx_ids: Vec<TxId>) -> Result<Self, TransactionError> {
        if tx_ids.len() > MAX_GROUP_SIZE {
            return Err(TransactionError::GroupTooLarge {
                size: tx_ids.len(),
                max: MAX_GROUP_SIZE,
            });
        }
        Ok(Self { tx_ids })
    }

    /// The canonical record form: `{txlist: [id…]}`.
    pub fn to_value(&self) -> Value {
        let ids: Vec<Value> = self
            .tx_ids
            .iter()
            .map(|id| Value::bytes(id.as_bytes().to_vec()))
            .collect();
        Value::map(vec![("txlist", Value::Array(ids))])
    }

    /// The group id: digest of the tagged canonical record.
    pub fn commitment(&self) -> GroupId {
        let record = encode(&self.to_value());
        let mut bytes = Vec::with_capacity(tags::TXGROUP.len() + record.len());
        bytes.extend_from_slice(tags::TXGROUP);
        bytes.extend_from_slice(&record);
        GroupId::new(digest(&bytes))
    }
}

/// Compute the group id for an ordered batch of transactions.
pub fn compute_group_id(txns: &[Transaction]) -> Result<GroupId, TransactionError> {
    let ids: Vec<TxId> = txns.iter().map(Transaction::raw_id).collect();
    Ok(TxGroup::new(ids)?.commitment())
}

/// Compute the group id and assign it to every transaction whose sender's
/// text address equals `filter` (or to all of them when no filter is
/// given). Returns the indices of the transactions that were assigned.
///
/// A filter that matches no sender yields an empty result; matching is
/// exact string equality over encoded addresses, nothing fuzzier.
pub fn assign_group_id(
    txns: &mut [Transaction],
    filter: Option<&str>,
) -> Result<Vec<usize>, TransactionError> {
    let group_id = compute_group_id(txns)?;
    let mut assigned = Vec::with_capacity(txns.len());
    for (index, txn) in txns.iter_mut().enumerate() {
        let matches = match filter {
            None => true,
            Some(address) => {
                encode_address(&PublicKey(*txn.sender.as_bytes())) == address
            }
        };
        if matches {
            txn.group = group_id;
            assigned.push(index);
        }
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TxPayload;
    use lumen_crypto::{encode_address, keypair_from_seed};
    use lumen_types::Address;

    fn payment(sender: Address, amount: u64) -> Transaction {
        Transaction {
            sender,
            fee: 10,
            first_round: 51,
            last_round: 61,
            genesis_id: String::new(),
            genesis_hash: [0xAB; 32],
            note: vec![],
            group: GroupId::ZERO,
            payload: TxPayload::Payment {
                receiver: Address::new([7u8; 32]),
                amount,
                close_remainder_to: Address::ZERO,
            },
        }
    }

    #[test]
    fn group_id_is_deterministic() {
        let txns = vec![
            payment(Address::new([1u8; 32]), 100),
            payment(Address::new([2u8; 32]), 200),
        ];
        assert_eq!(
            compute_group_id(&txns).unwrap(),
            compute_group_id(&txns).unwrap()
        );
    }

    #[test]
    fn group_id_is_order_sensitive() {
        let a = payment(Address::new([1u8; 32]), 100);
        let b = payment(Address::new([2u8; 32]), 200);
        let forward = compute_group_id(&[a.clone(), b.clone()]).unwrap();
        let reversed = compute_group_id(&[b, a]).unwrap();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn oversized_group_rejected() {
        let txns: Vec<Transaction> = (0..17)
            .map(|i| payment(Address::new([i as u8; 32]), 100))
            .collect();
        assert_eq!(
            compute_group_id(&txns),
            Err(TransactionError::GroupTooLarge { size: 17, max: 16 })
        );
    }

    #[test]
    fn assign_without_filter_mutates_all() {
        let mut txns = vec![
            payment(Address::new([1u8; 32]), 100),
            payment(Address::new([2u8; 32]), 200),
        ];
        let assigned = assign_group_id(&mut txns, None).unwrap();
        assert_eq!(assigned, vec![0, 1]);
        let gid = txns[0].group;
        assert!(!gid.is_zero());
        assert_eq!(txns[1].group, gid);
    }

    #[test]
    fn assign_with_filter_mutates_matching_sender_only() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let sender = Address::from(&kp.public);
        let mut txns = vec![
            payment(sender, 100),
            payment(Address::new([2u8; 32]), 200),
        ];
        let address = encode_address(&kp.public);
        let assigned = assign_group_id(&mut txns, Some(&address)).unwrap();
        assert_eq!(assigned, vec![0]);
        assert!(!txns[0].group.is_zero());
        assert!(txns[1].group.is_zero());
    }

    #[test]
    fn assign_with_unmatched_filter_mutates_nothing() {
        let mut txns = vec![payment(Address::new([1u8; 32]), 100)];
        let outsider = encode_address(&keypair_from_seed(&[9u8; 32]).public);
        let assigned = assign_group_id(&mut txns, Some(&outsider)).unwrap();
        assert!(assigned.is_empty());
        assert!(txns[0].group.is_zero());
    }

    #[test]
    fn group_id_changes_the_transaction_id() {
        let mut txn = payment(Address::new([1u8; 32]), 100);
        let before = txn.id();
        let group = compute_group_id(std::slice::from_ref(&txn)).unwrap();
        txn.group = group;
        assert_ne!(txn.id(), before);
    }
}
