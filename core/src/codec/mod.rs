//! codec: pluggable value <-> bytes conversion at the pipeline's edges.
//!
//! Any serialization format satisfies the contract; the pipeline only needs
//! `encode(&T) -> bytes` and `decode(bytes) -> T`.

pub mod types;
pub mod binary;
pub mod json;

pub use types::{Codec, CodecError, CodecKind, FnCodec};
pub use binary::BincodeCodec;
pub use json::JsonCodec;
