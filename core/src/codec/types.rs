use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Structured encoder/decoder for values of type `T`.
///
/// Implementations must round-trip: `decode(encode(v)) == v`.
pub trait Codec<T>: Send + Sync {
    fn name(&self) -> &'static str;
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{codec} encode failed: {msg}")]
    Encode { codec: String, msg: String },

    #[error("{codec} decode failed: {msg}")]
    Decode { codec: String, msg: String },
}

impl CodecError {
    pub fn encode(codec: &str, msg: impl fmt::Display) -> Self {
        CodecError::Encode { codec: codec.into(), msg: msg.to_string() }
    }

    pub fn decode(codec: &str, msg: impl fmt::Display) -> Self {
        CodecError::Decode { codec: codec.into(), msg: msg.to_string() }
    }
}

/// Backend selector used by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Bincode,
    Json,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Bincode => f.write_str("bincode"),
            CodecKind::Json    => f.write_str("json"),
        }
    }
}

type EncodeFn<T> = Arc<dyn Fn(&T) -> Result<Vec<u8>, CodecError> + Send + Sync>;
type DecodeFn<T> = Arc<dyn Fn(&[u8]) -> Result<T, CodecError> + Send + Sync>;

/// Codec assembled from a pair of caller functions.
pub struct FnCodec<T> {
    encode: EncodeFn<T>,
    decode: DecodeFn<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FnCodec<T> {
    pub fn new<E, D>(encode: E, decode: D) -> Self
    where
        E: Fn(&T) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        Self { encode: Arc::new(encode), decode: Arc::new(decode), _marker: PhantomData }
    }
}

impl<T> Codec<T> for FnCodec<T> {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        (self.encode)(value)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        (self.decode)(bytes)
    }
}
