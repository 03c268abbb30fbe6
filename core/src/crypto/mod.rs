//! crypto: RSA-backed stages.
//!
//! - `rsa_blocks`: block-chunked PKCS#1 v1.5 encryption
//! - `signing`: SHA-256 + PKCS#1 v1.5 signed envelope
//! - `nonce`: anti-replay token envelope

pub mod types;
pub mod keys;
pub mod digest;
pub mod rsa_blocks;
pub mod signing;
pub mod nonce;

pub use types::*;
pub use keys::*;
pub use digest::*;
pub use rsa_blocks::*;
pub use signing::*;
pub use nonce::*;
