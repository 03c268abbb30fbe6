// ## 📂 File: `src/crypto/types.rs`

/// Failures raised by the RSA primitives themselves.
///
/// A signature that does not verify is not a `CryptoError`; it surfaces as
/// `PipelineError::SignatureInvalid` so callers can tell forgery from breakage.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Modulus too small to carry a single plaintext byte after padding.
    #[error("RSA key of {size} bytes is too small for PKCS#1 v1.5 encryption")]
    KeyTooSmall { size: usize },

    #[error("RSA encrypt failed on block {block}: {source}")]
    Encrypt {
        block: usize,
        #[source]
        source: rsa::Error,
    },

    #[error("RSA decrypt failed on block {block}: {source}")]
    Decrypt {
        block: usize,
        #[source]
        source: rsa::Error,
    },

    #[error("RSA sign failed: {0}")]
    Sign(#[source] rsa::Error),
}
