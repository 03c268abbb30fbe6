//! Deflate (zlib wrapper) via flate2.

use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::compression::constants::{DEFAULT_LEVEL_DEFLATE, DEFAULT_MAX_DECOMPRESSED, MAX_LEVEL_DEFLATE};
use crate::compression::types::{CompressionError, Compressor};

const NAME: &str = "zlib";

#[derive(Debug, Clone, Copy)]
pub struct ZlibCompressor {
    level: Compression,
    /// Decompression output cap in bytes.
    max_output: usize,
}

impl ZlibCompressor {
    pub fn new(level: u32) -> Result<Self, CompressionError> {
        if level > MAX_LEVEL_DEFLATE {
            return Err(CompressionError::InvalidLevel {
                codec: NAME.into(),
                level,
                max: MAX_LEVEL_DEFLATE,
            });
        }
        Ok(Self { level: Compression::new(level), max_output: DEFAULT_MAX_DECOMPRESSED })
    }

    /// Replace the decompression cap (`DEFAULT_MAX_DECOMPRESSED` by default).
    pub fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = limit;
        self
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }

    pub fn max_output(&self) -> usize {
        self.max_output
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self {
            level: Compression::new(DEFAULT_LEVEL_DEFLATE),
            max_output: DEFAULT_MAX_DECOMPRESSED,
        }
    }
}

impl Compressor for ZlibCompressor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        // Each buffer is its own zlib stream
        let mut enc = ZlibEncoder::new(Vec::with_capacity(input.len() / 2 + 16), self.level);
        enc.write_all(input).map_err(|e| CompressionError::process(NAME, e))?;
        enc.finish().map_err(|e| CompressionError::process(NAME, e))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        // One byte past the cap tells "exactly at limit" from "over it"
        let mut dec = ZlibDecoder::new(input).take((self.max_output as u64).saturating_add(1));
        let mut out = Vec::new();
        dec.read_to_end(&mut out).map_err(|e| CompressionError::process(NAME, e))?;
        if out.len() > self.max_output {
            return Err(CompressionError::OutputTooLarge { codec: NAME.into(), limit: self.max_output });
        }
        Ok(out)
    }
}
