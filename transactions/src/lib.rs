//! Lumen record builders.
//!
//! Each builder owns a domain-separation tag and knows how to turn its
//! typed record into canonical bytes, an id, and a signed blob:
//! - **Transaction**: payment and key-registration records (`TX` tag)
//! - **Bid**: auction bids (`aB` tag)
//! - **LogicSig**: program-based spending conditions (`Program` tag)
//! - **TxGroup**: group commitments over ordered transaction ids (`TG` tag)

pub mod bid;
pub mod error;
pub mod group;
pub mod logicsig;
pub mod transaction;

pub use bid::{verify_signed_bid, Bid};
pub use error::TransactionError;
pub use group::{assign_group_id, compute_group_id, TxGroup, MAX_GROUP_SIZE};
pub use logicsig::{sign_logic_sig_transaction, LogicSig};
pub use transaction::{Transaction, TxPayload};
