//! compression/types.rs
//! Compressor capability and its errors.

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: String, msg: String },

    #[error("invalid level {level} for {codec} (max {max})")]
    InvalidLevel { codec: String, level: u32, max: u32 },

    #[error("codec {codec} output exceeds {limit} bytes")]
    OutputTooLarge { codec: String, limit: usize },
}

impl CompressionError {
    pub fn process(codec: &str, msg: impl std::fmt::Display) -> Self {
        CompressionError::CodecProcessFailed { codec: codec.into(), msg: msg.to_string() }
    }
}

/// Byte-to-byte compressor over whole buffers.
///
/// Shared across threads by built pipelines, so implementations must be
/// `Send + Sync` and must not keep per-call state.
pub trait Compressor: Send + Sync {
    fn name(&self) -> &'static str;
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;
}
