//! Chunked transport: one message as a run of data frames plus a sentinel.
//!
//! ```text
//! [ len=1024 | chunk 0 ] [ len=1024 | chunk 1 ] ... [ len=r | remainder ] [ len=0 ]
//! ```
//!
//! The sentinel alone delimits the message; the reader never needs the
//! stream's own length.

use std::io::{Read, Write};

use bytes::Bytes;
use tracing::debug;

use crate::constants::CHUNK_SIZE;
use crate::framing::{read_frame, write_frame, write_sentinel, Frame};
use crate::stream::io::SharedStream;
use crate::stream::timeout::Deadline;
use crate::types::PipelineError;

/// Write `payload` as `CHUNK_SIZE` frames followed by a sentinel.
///
/// Returns the total bytes placed on the wire, prefixes and sentinel
/// included. On error, frames already written stay on the wire.
pub fn write_message<S>(
    stream: &SharedStream<S>,
    payload: impl Into<Bytes>,
    deadline: &Deadline,
) -> Result<usize, PipelineError>
where
    S: Write + Send + 'static,
{
    let payload: Bytes = payload.into();
    let mut written = 0usize;
    let mut offset = 0usize;

    while offset < payload.len() {
        let end = (offset + CHUNK_SIZE).min(payload.len());
        let chunk = payload.slice(offset..end);
        let handle = stream.clone();

        let n = deadline.run("write frame", move || {
            let mut w = handle.lock()?;
            Ok(write_frame(&mut *w, &chunk)?)
        })?;

        debug!(bytes = n, last = end == payload.len(), "wrote chunk");
        written += n;
        offset = end;
    }

    let handle = stream.clone();
    written += deadline.run("write sentinel", move || {
        let mut w = handle.lock()?;
        Ok(write_sentinel(&mut *w)?)
    })?;

    debug!(bytes = written, "wrote message");
    Ok(written)
}

/// Read frames until the sentinel and reassemble the message.
///
/// Returns the payload and the total bytes consumed, sentinel included.
pub fn read_message<S>(
    stream: &SharedStream<S>,
    deadline: &Deadline,
) -> Result<(Vec<u8>, usize), PipelineError>
where
    S: Read + Send + 'static,
{
    let mut payload = Vec::new();
    let mut consumed = 0usize;

    loop {
        let handle = stream.clone();
        let frame: Frame = deadline.run("read frame", move || {
            let mut r = handle.lock()?;
            Ok(read_frame(&mut *r)?)
        })?;

        consumed += frame.wire_len;
        if frame.is_sentinel() {
            break;
        }

        debug!(bytes = frame.wire_len, "read chunk");
        payload.extend_from_slice(&frame.payload);
    }

    debug!(bytes = consumed, payload = payload.len(), "read message");
    Ok((payload, consumed))
}
