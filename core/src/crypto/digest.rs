use sha2::{Digest as _, Sha256};
use tracing::trace;

/// SHA-256 output length (bytes).
pub const SHA256_LEN: usize = 32;

/// Digest signed by the signature stage.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    let digest: [u8; SHA256_LEN] = Sha256::digest(data).into();
    trace!(bytes = data.len(), digest = %hex::encode(digest), "sha256");
    digest
}
