//! Wire constants shared by every layer.

/// Width of the big-endian length prefix in front of every frame.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Payload bytes carried by each data frame of the chunked transport.
/// The final chunk of a message carries the remainder.
pub const CHUNK_SIZE: usize = 1024;

/// Largest payload a single frame can describe.
pub const MAX_FRAME_PAYLOAD: usize = u32::MAX as usize;

/// Step used when pulling a frame payload off a stream, so a hostile length
/// prefix cannot force a multi-gigabyte allocation before any data arrives.
pub const READ_STEP: usize = 64 * 1024;

/// PKCS#1 v1.5 encryption padding overhead per RSA block.
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// Width of the anti-replay nonce field (u32, big-endian).
pub const NONCE_LEN: usize = 4;
