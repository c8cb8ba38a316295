use lumen_encoding::EncodingError;
use thiserror::Error;

/// Errors arising from multisig operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultisigError {
    #[error("signing key is not part of the multisig preimage")]
    UnknownSigner,

    #[error("multisig blobs carry different preimages")]
    PreimageConflict,

    #[error("multisig blobs carry different transaction payloads")]
    TransactionMismatch,

    #[error("conflicting signatures for slot {slot}")]
    ConflictingSignature { slot: usize },

    #[error("no multisig transactions to merge")]
    NoTransactions,

    #[error("transaction sender does not match the multisig preimage address")]
    BadSender,

    #[error("malformed multisig blob: {0}")]
    MalformedBlob(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
