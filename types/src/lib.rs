//! Fundamental types for the Lumen client core.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: key material, addresses, transaction/group identifiers, and
//! microlumen amount conversion.

pub mod address;
pub mod amount;
pub mod hash;
pub mod keys;
pub mod tags;

pub use address::Address;
pub use amount::{
    lumens_to_microlumens, microlumens_to_lumens, AmountError, MAX_MICROLUMENS,
    MICROLUMENS_PER_LUMEN,
};
pub use hash::{GroupId, TxId};
pub use keys::{KeyPair, PublicKey, SecretKey, Signature};
