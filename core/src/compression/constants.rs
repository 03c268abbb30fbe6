/// Default zlib level (balanced).
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;

/// Highest level flate2 accepts.
pub const MAX_LEVEL_DEFLATE: u32 = 9;

/// Largest output a single decompress call may produce (256 MiB).
/// Inflating past it fails with `OutputTooLarge` instead of growing memory
/// without bound on a hostile or corrupt stream.
pub const DEFAULT_MAX_DECOMPRESSED: usize = 256 * 1024 * 1024;
