//! Canonical deterministic binary encoding of structured records.
//!
//! This is the exact byte layer that gets hashed and signed, and the wire
//! form the node accepts, so determinism is the contract: map keys are
//! emitted in lexicographic order and entries holding a type's zero value
//! are omitted entirely. Two semantically-equal records therefore always
//! produce byte-identical encodings.
//!
//! The binary layout is MessagePack-compatible (type-tagged markers,
//! smallest-width integer formats). It is not a general-purpose
//! serialization layer: the supported value set is exactly what the
//! protocol's records need.

pub mod decode;
pub mod encode;
pub mod error;
pub mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::EncodingError;
pub use value::Value;
