//! Compact binary encoding via bincode (serde integration, standard config).
//! Default codec when a pipeline is built without an explicit choice.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::codec::types::{Codec, CodecError};

const NAME: &str = "bincode";

#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl<T> Codec<T> for BincodeCodec
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        NAME
    }

    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let bytes = ::bincode::serde::encode_to_vec(value, ::bincode::config::standard())
            .map_err(|e| CodecError::encode(NAME, e))?;
        debug!(codec = NAME, bytes = bytes.len(), "encoded value");
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let (value, used): (T, usize) =
            ::bincode::serde::decode_from_slice(bytes, ::bincode::config::standard())
                .map_err(|e| CodecError::decode(NAME, e))?;

        if used != bytes.len() {
            return Err(CodecError::decode(
                NAME,
                format!("{} trailing bytes after value", bytes.len() - used),
            ));
        }

        debug!(codec = NAME, bytes = used, "decoded value");
        Ok(value)
    }
}
