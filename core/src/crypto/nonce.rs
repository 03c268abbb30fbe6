// ## 📂 File: `src/crypto/nonce.rs`

//! Anti-replay nonce envelope: `[ len=4 | nonce u32 BE ] [ len | payload ]`.
//!
//! The stage only carries the token. Freshness policy (counter, seen-set,
//! time window) belongs to the caller's `accept` predicate.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder};
use tracing::{debug, warn};

use crate::constants::NONCE_LEN;
use crate::framing::{write_field, FrameError, FrameReader};
use crate::stage::{Stage, StageFn, StageKind};
use crate::types::PipelineError;

pub type NonceGenerateFn = Arc<dyn Fn() -> u32 + Send + Sync>;
pub type NonceAcceptFn = Arc<dyn Fn(u32) -> bool + Send + Sync>;

/// Prefix `payload` with `nonce`.
pub fn seal_nonce(nonce: u32, payload: &[u8]) -> Result<Vec<u8>, PipelineError> {
    let mut token = [0u8; NONCE_LEN];
    BigEndian::write_u32(&mut token, nonce);

    let mut out = Vec::with_capacity(payload.len() + NONCE_LEN + 8);
    write_field(&mut out, &token)?;
    write_field(&mut out, payload)?;
    Ok(out)
}

/// Validate the envelope's nonce with `accept` and return the payload.
///
/// A rejected nonce fails with `NonceInvalid` before the payload field is read.
pub fn open_nonce<F>(envelope: &[u8], accept: F) -> Result<Vec<u8>, PipelineError>
where
    F: FnOnce(u32) -> bool,
{
    let mut reader = FrameReader::new(envelope);
    let token = reader.next_field()?;
    if token.len() != NONCE_LEN {
        return Err(FrameError::Malformed(format!(
            "nonce field is {} bytes, expected {}",
            token.len(),
            NONCE_LEN
        ))
        .into());
    }

    let nonce = BigEndian::read_u32(&token);
    if !accept(nonce) {
        warn!(nonce, "nonce rejected");
        return Err(PipelineError::NonceInvalid { nonce });
    }

    let payload = reader.next_field()?;
    reader.finish("nonce envelope")?;
    Ok(payload)
}

pub fn seal_fn(generate: NonceGenerateFn) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let nonce = generate();
        debug!(nonce, "sealing nonce");
        seal_nonce(nonce, &data)
    })
}

pub fn open_fn(accept: NonceAcceptFn) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        open_nonce(&data, |nonce| accept(nonce))
    })
}

pub fn nonce_stage(generate: NonceGenerateFn, accept: NonceAcceptFn) -> Stage {
    Stage::new(StageKind::Nonce, seal_fn(generate), open_fn(accept))
}

/// Counter-backed nonce policy.
///
/// `next` hands out 1, 2, 3, ...; `accept` admits only values strictly
/// greater than the last accepted one. Share one instance per direction.
#[derive(Debug, Default)]
pub struct MonotonicNonce {
    issued: AtomicU32,
    accepted: AtomicU32,
}

impl MonotonicNonce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce to send. Wraps after `u32::MAX`.
    pub fn next(&self) -> u32 {
        self.issued.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Admit `nonce` if it is newer than everything accepted so far.
    pub fn accept(&self, nonce: u32) -> bool {
        self.accepted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| (nonce > last).then_some(nonce))
            .is_ok()
    }

    /// Generator and acceptor callbacks backed by this counter.
    pub fn callbacks(self: &Arc<Self>) -> (NonceGenerateFn, NonceAcceptFn) {
        let generator = Arc::clone(self);
        let acceptor = Arc::clone(self);
        (
            Arc::new(move || generator.next()),
            Arc::new(move |nonce: u32| acceptor.accept(nonce)),
        )
    }
}
