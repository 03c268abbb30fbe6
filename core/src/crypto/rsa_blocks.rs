//! crypto/rsa_blocks.rs
//! RSA PKCS#1 v1.5 encryption over payloads of any length.
//!
//! Wire format (stage output):
//!
//! ```text
//! [ len | RSA(block 0) ] [ len | RSA(block 1) ] ... [ len=0 ]
//! ```
//!
//! Each plaintext block holds at most `key.size() - 11` bytes (117 for a
//! 1024-bit key) and is encrypted on its own with fresh padding randomness.

use std::sync::Arc;

use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use crate::constants::PKCS1_V15_OVERHEAD;
use crate::crypto::keys::{PrivateKeyFn, PublicKeyFn};
use crate::crypto::types::CryptoError;
use crate::framing::{write_frame, write_sentinel, FrameReader};
use crate::stage::{Stage, StageFn, StageKind};
use crate::types::PipelineError;

/// Largest plaintext block a key can encrypt under PKCS#1 v1.5.
pub fn block_capacity<K: PublicKeyParts>(key: &K) -> Result<usize, CryptoError> {
    let size = key.size();
    match size.checked_sub(PKCS1_V15_OVERHEAD) {
        Some(bound) if bound > 0 => Ok(bound),
        _ => Err(CryptoError::KeyTooSmall { size }),
    }
}

/// Encrypt `plaintext` block by block into a sentinel-terminated frame run.
///
/// Nothing is returned unless every block encrypted.
pub fn encrypt_blocks(public: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>, PipelineError> {
    let bound = block_capacity(public)?;
    let blocks = plaintext.len().div_ceil(bound);
    let mut out = Vec::with_capacity(blocks * (public.size() + 4) + 4);
    let mut rng = rand::thread_rng();

    for (index, block) in plaintext.chunks(bound).enumerate() {
        let ciphertext = public
            .encrypt(&mut rng, Pkcs1v15Encrypt, block)
            .map_err(|source| CryptoError::Encrypt { block: index, source })?;
        write_frame(&mut out, &ciphertext)?;
    }
    write_sentinel(&mut out)?;

    debug!(plaintext = plaintext.len(), blocks, bound, ciphertext = out.len(), "encrypted blocks");
    Ok(out)
}

/// Decrypt a frame run produced by [`encrypt_blocks`].
pub fn decrypt_blocks(private: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, PipelineError> {
    let mut reader = FrameReader::new(ciphertext);
    let mut plaintext = Vec::new();
    let mut blocks = 0usize;

    loop {
        let frame = reader.next_frame()?;
        if frame.is_sentinel() {
            break;
        }
        let block = private
            .decrypt(Pkcs1v15Encrypt, &frame.payload)
            .map_err(|source| CryptoError::Decrypt { block: blocks, source })?;
        plaintext.extend_from_slice(&block);
        blocks += 1;
    }
    reader.finish("ciphertext block sequence")?;

    debug!(ciphertext = ciphertext.len(), blocks, plaintext = plaintext.len(), "decrypted blocks");
    Ok(plaintext)
}

/// Write-side encryption step. Needs only the receiver's public key.
pub fn encrypt_fn(public: PublicKeyFn) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let key = public();
        encrypt_blocks(&key, &data)
    })
}

/// Read-side decryption step. Needs only the receiver's private key.
pub fn decrypt_fn(private: PrivateKeyFn) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let key = private();
        decrypt_blocks(&key, &data)
    })
}

/// Encrypt on write with the public key, decrypt on read with the private key.
pub fn encryption_stage(public: PublicKeyFn, private: PrivateKeyFn) -> Stage {
    Stage::new(StageKind::Encryption, encrypt_fn(public), decrypt_fn(private))
}
