//! compression/mod.rs
//! Whole-buffer compression as a pipeline stage.
//!
//! Notes:
//! - The compressor sees the entire stage input; it has no framing duties.
//! - Backends plug in through the `Compressor` trait; zlib (flate2) ships by default.

pub mod constants;
pub mod types;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use codecs::ZlibCompressor;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::stage::{Stage, StageFn, StageKind};
use crate::types::PipelineError;

pub fn compress_fn(compressor: Arc<dyn Compressor>) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let compressed = compressor.compress(&data)?;
        debug!(codec = compressor.name(), before = data.len(), after = compressed.len(), "compressed");
        if compressed.len() > data.len() {
            warn!(
                codec = compressor.name(),
                uncompressed = data.len(),
                compressed = compressed.len(),
                "compression increased the payload size; payload may be too small to benefit"
            );
        }
        Ok(compressed)
    })
}

pub fn decompress_fn(compressor: Arc<dyn Compressor>) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let restored = compressor.decompress(&data)?;
        debug!(codec = compressor.name(), bytes = restored.len(), "decompressed");
        Ok(restored)
    })
}

/// Stage that compresses on write and decompresses on read.
pub fn compression_stage(compressor: Arc<dyn Compressor>) -> Stage {
    Stage::new(StageKind::Compression, compress_fn(Arc::clone(&compressor)), decompress_fn(compressor))
}
