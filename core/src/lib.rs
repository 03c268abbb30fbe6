//! onwire-core
//!
//! Typed transport over a connected byte stream: values are encoded, pushed
//! through reversible byte stages (compression, RSA encryption, signing,
//! nonce) and written as length-prefixed frames ended by a sentinel.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;
mod logging;

// Wire
pub mod framing;
pub mod stream;

// Transforms
pub mod stage;
pub mod codec;
pub mod compression;
pub mod crypto;

pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{BincodeCodec, Codec, CodecError, CodecKind, FnCodec, JsonCodec};
    pub use crate::compression::{Compressor, ZlibCompressor};
    pub use crate::config::{ConfigError, PipelineConfig};
    pub use crate::crypto::{fixed_pair, MonotonicNonce, PrivateKeyFn, PublicKeyFn};
    pub use crate::pipeline::{
        Pipeline, PipelineBuilder, ReadPipeline, ReadPipelineBuilder, WritePipeline,
        WritePipelineBuilder,
    };
    pub use crate::stage::{Stage, StageKind, Step};
    pub use crate::stream::{Deadline, SharedStream};
    pub use crate::types::PipelineError;
}
