//! Threshold multisig engine.
//!
//! A multisig account is identified by its preimage: a version, a
//! threshold, and an *ordered* list of public keys. Signers produce partial
//! signatures independently; `merge` folds any number of partially-signed
//! blobs into one, refusing to reconcile conflicting inputs. The threshold
//! is advisory metadata — whether enough slots are filled for submission is
//! the node's concern, not this engine's.

pub mod engine;
pub mod error;
pub mod preimage;
pub mod signature;

pub use engine::{
    append_sign_multisig_transaction, merge_multisig_transactions, partial_sign_transaction,
};
pub use error::MultisigError;
pub use preimage::MultisigPreimage;
pub use signature::{MultisigSignature, Subsig};
