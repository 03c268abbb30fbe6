use std::io;
use std::time::Duration;

use crate::{
    codec::CodecError,
    compression::CompressionError,
    config::ConfigError,
    crypto::CryptoError,
    framing::FrameError,
};

/// Unified pipeline error covering I/O, framing, codec, compression, crypto,
/// envelope validation and timeouts.
/// - `From<T>` impls enable `?` across every layer.
/// - Variants stay distinct so callers can tell a timeout (retry) from a
///   rejected nonce (drop) from a forged signature (alert).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Underlying stream failure outside of frame parsing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Frame-level error (short read/write, malformed envelope).
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Structured encode/decode failure.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Compression/decompression error.
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// Failure inside an RSA primitive (encrypt, decrypt, sign).
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Signature did not verify against the payload and public key.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// The caller's nonce predicate rejected the token.
    #[error("nonce {nonce} is invalid")]
    NonceInvalid { nonce: u32 },

    /// The operation did not finish before its deadline. Its outcome is unknown.
    #[error("{operation} timed out after {after:?}")]
    TimedOut { operation: String, after: Duration },

    /// A raced worker exited without reporting a result.
    #[error("{operation} worker exited without a result")]
    WorkerLost { operation: String },

    /// Failure raised by a caller-supplied stage.
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid pipeline configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Wrap an arbitrary error raised by a custom stage.
    pub fn stage<E>(stage: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        PipelineError::Stage { stage: stage.into(), source: source.into() }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PipelineError::TimedOut { .. })
    }

    /// True for stream-level failures: underlying I/O and short reads/writes.
    pub fn is_io(&self) -> bool {
        match self {
            PipelineError::Io(_) => true,
            PipelineError::Frame(e) => e.is_io(),
            _ => false,
        }
    }
}
