use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::codec::types::{Codec, CodecError};

const NAME: &str = "json";

/// JSON via serde_json. Larger on the wire than bincode, but readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        NAME
    }

    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let bytes = serde_json::to_vec(value).map_err(|e| CodecError::encode(NAME, e))?;
        debug!(codec = NAME, bytes = bytes.len(), "encoded value");
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let value = serde_json::from_slice(bytes).map_err(|e| CodecError::decode(NAME, e))?;
        debug!(codec = NAME, bytes = bytes.len(), "decoded value");
        Ok(value)
    }
}
