use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::constants::{LENGTH_PREFIX_LEN, MAX_FRAME_PAYLOAD};
use crate::framing::types::FrameError;

/// Encode a payload into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ length (4, BE) ]
/// [ payload (length) ]
/// ```
///
/// Zero-length payloads are encoded as-is; callers decide whether that is a
/// sentinel or an empty envelope field.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_FRAME_PAYLOAD {
        return Err(FrameError::Oversized { len: payload.len() });
    }

    let mut out = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    out.write_u32::<BigEndian>(payload.len() as u32)?;
    out.extend_from_slice(payload);
    Ok(out)
}

/// Write one data frame. Returns the bytes placed on the wire.
///
/// Prefix and payload go out in a single `write_all`, so a short write
/// surfaces as `WriteZero` and slow streams see one call per frame.
pub fn write_frame<W: Write + ?Sized>(w: &mut W, payload: &[u8]) -> Result<usize, FrameError> {
    if payload.is_empty() {
        return Err(FrameError::EmptyPayload);
    }
    write_field(w, payload)
}

/// Write the zero-length sentinel that terminates a frame sequence.
pub fn write_sentinel<W: Write + ?Sized>(w: &mut W) -> Result<usize, FrameError> {
    write_field(w, &[])
}

/// Write a frame that may be empty.
///
/// Only for fixed-arity envelopes, where a zero-length frame is an empty
/// field and never read as end-of-sequence.
pub fn write_field<W: Write + ?Sized>(w: &mut W, payload: &[u8]) -> Result<usize, FrameError> {
    let wire = encode_frame(payload)?;
    w.write_all(&wire)?;
    Ok(wire.len())
}
