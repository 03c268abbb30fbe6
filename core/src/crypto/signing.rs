//! crypto/signing.rs
//! Signed envelope: `[ len | payload ] [ len | signature ]`.
//!
//! The signature is RSA PKCS#1 v1.5 over SHA-256(payload). Verification
//! happens before any payload byte is handed on.

use std::sync::Arc;

use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::{debug, warn};

use crate::crypto::digest::sha256;
use crate::crypto::keys::{PrivateKeyFn, PublicKeyFn};
use crate::crypto::types::CryptoError;
use crate::framing::{write_field, FrameReader};
use crate::stage::{Stage, StageFn, StageKind};
use crate::types::PipelineError;

/// Sign `payload` and wrap both in a two-field envelope.
pub fn sign_envelope(private: &RsaPrivateKey, payload: &[u8]) -> Result<Vec<u8>, PipelineError> {
    let digest = sha256(payload);
    let signature = private
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(CryptoError::Sign)?;

    let mut out = Vec::with_capacity(payload.len() + signature.len() + 8);
    write_field(&mut out, payload)?;
    write_field(&mut out, &signature)?;

    debug!(payload = payload.len(), signature = signature.len(), "signed payload");
    Ok(out)
}

/// Check the envelope's signature and return the payload.
///
/// Any mismatch is `SignatureInvalid`; the payload is dropped.
pub fn verify_envelope(public: &RsaPublicKey, envelope: &[u8]) -> Result<Vec<u8>, PipelineError> {
    let mut reader = FrameReader::new(envelope);
    let payload = reader.next_field()?;
    let signature = reader.next_field()?;
    reader.finish("signed envelope")?;

    let digest = sha256(&payload);
    if let Err(e) = public.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature) {
        warn!(payload = payload.len(), error = %e, "signature verification failed");
        return Err(PipelineError::SignatureInvalid);
    }

    debug!(payload = payload.len(), "verified signature");
    Ok(payload)
}

pub fn sign_fn(private: PrivateKeyFn) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let key = private();
        sign_envelope(&key, &data)
    })
}

pub fn verify_fn(public: PublicKeyFn) -> StageFn {
    Arc::new(move |data: Vec<u8>| -> Result<Vec<u8>, PipelineError> {
        let key = public();
        verify_envelope(&key, &data)
    })
}

/// Sign on write with the private key, verify on read with the public key.
pub fn signing_stage(public: PublicKeyFn, private: PrivateKeyFn) -> Stage {
    Stage::new(StageKind::Signing, sign_fn(private), verify_fn(public))
}
