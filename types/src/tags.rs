//! Domain-separation tags.
//!
//! Every signable payload is prefixed with a fixed ASCII tag so a signature
//! over one kind of payload can never be replayed as another kind.

/// Transaction records.
pub const TRANSACTION: &[u8] = b"TX";

/// Auction bid records.
pub const BID: &[u8] = b"aB";

/// Transaction-group commitments.
pub const TXGROUP: &[u8] = b"TG";

/// Logic-signature programs.
pub const PROGRAM: &[u8] = b"Program";

/// Arbitrary caller-supplied byte payloads.
pub const BYTES: &[u8] = b"MX";

/// Multisig account address preimages.
pub const MULTISIG_ADDR: &[u8] = b"MultisigAddr";
