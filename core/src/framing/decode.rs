use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{LENGTH_PREFIX_LEN, READ_STEP};
use crate::framing::types::{Frame, FrameError};

/// Fill `buf` as far as the stream allows. Returns the bytes read; less than
/// `buf.len()` only at end of stream.
fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<usize, FrameError> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
    Ok(off)
}

/// Read one frame.
///
/// - Zero length: returns the sentinel (`wire_len == 4`).
/// - Otherwise reads exactly `length` bytes.
/// - End of stream anywhere inside the frame is `Truncated`, never a sentinel.
pub fn read_frame<R: Read + ?Sized>(r: &mut R) -> Result<Frame, FrameError> {
    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    let got = read_full(r, &mut prefix)?;
    if got < LENGTH_PREFIX_LEN {
        return Err(FrameError::Truncated { expected: LENGTH_PREFIX_LEN, actual: got });
    }

    let len = BigEndian::read_u32(&prefix) as usize;
    if len == 0 {
        return Ok(Frame::sentinel());
    }

    // Grow in bounded steps: the prefix is untrusted until the bytes show up.
    let mut payload = Vec::with_capacity(len.min(READ_STEP));
    while payload.len() < len {
        let start = payload.len();
        let step = (len - start).min(READ_STEP);
        payload.resize(start + step, 0);

        let n = read_full(r, &mut payload[start..])?;
        if n < step {
            return Err(FrameError::Truncated { expected: len, actual: start + n });
        }
    }

    Ok(Frame { payload, wire_len: LENGTH_PREFIX_LEN + len })
}

/// Read one envelope field. A zero-length frame is an empty field here.
pub fn read_field<R: Read + ?Sized>(r: &mut R) -> Result<Vec<u8>, FrameError> {
    read_frame(r).map(Frame::into_payload)
}

/// Cursor over an in-memory frame sequence (stage envelopes, RSA block lists).
#[derive(Debug)]
pub struct FrameReader<'a> {
    remaining: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(wire: &'a [u8]) -> Self {
        Self { remaining: wire }
    }

    pub fn next_frame(&mut self) -> Result<Frame, FrameError> {
        read_frame(&mut self.remaining)
    }

    pub fn next_field(&mut self) -> Result<Vec<u8>, FrameError> {
        read_field(&mut self.remaining)
    }

    /// Require that the envelope has been consumed exactly.
    pub fn finish(self, what: &str) -> Result<(), FrameError> {
        if self.remaining.is_empty() {
            Ok(())
        } else {
            Err(FrameError::Malformed(format!(
                "{} trailing bytes after {}",
                self.remaining.len(),
                what
            )))
        }
    }
}
