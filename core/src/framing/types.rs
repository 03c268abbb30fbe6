use std::io;

use crate::constants::LENGTH_PREFIX_LEN;

/// One decoded frame.
///
/// A zero-length frame is the sentinel that ends a chunked sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload: Vec<u8>,
    /// Bytes consumed from the stream, prefix included.
    pub wire_len: usize,
}

impl Frame {
    pub fn sentinel() -> Self {
        Self { payload: Vec::new(), wire_len: LENGTH_PREFIX_LEN }
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Underlying stream failure, including short writes (`WriteZero`).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended before the announced bytes arrived.
    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// A data frame may never be empty; zero length is reserved for the sentinel.
    #[error("empty payload cannot be sent as a data frame")]
    EmptyPayload,

    #[error("payload of {len} bytes does not fit a u32 length prefix")]
    Oversized { len: usize },

    /// Envelope structure is wrong (field width, trailing bytes).
    #[error("malformed frame: {0}")]
    Malformed(String),
}

impl FrameError {
    /// Short reads/writes and stream failures, as opposed to structural errors.
    pub fn is_io(&self) -> bool {
        matches!(self, FrameError::Io(_) | FrameError::Truncated { .. })
    }
}
