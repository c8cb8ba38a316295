use lumen_encoding::EncodingError;
use lumen_multisig::MultisigError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("signing key does not match the record's declared sender")]
    SenderKeyMismatch,

    #[error("logic signature does not verify for the transaction sender")]
    InvalidSignature,

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("transaction group holds {size} transactions, maximum is {max}")]
    GroupTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Multisig(#[from] MultisigError),
}
