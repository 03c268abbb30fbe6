//! Key retrieval callbacks.
//!
//! Stages never hold keys directly. They call these functions once per
//! invocation, so rotation happens on the caller's side without rebuilding
//! the pipeline. Callbacks may run concurrently from different calls.

use std::sync::Arc;

use rsa::{RsaPrivateKey, RsaPublicKey};

pub type PublicKeyFn = Arc<dyn Fn() -> RsaPublicKey + Send + Sync>;
pub type PrivateKeyFn = Arc<dyn Fn() -> RsaPrivateKey + Send + Sync>;

/// Callback that always hands out `key`.
pub fn fixed_public(key: RsaPublicKey) -> PublicKeyFn {
    Arc::new(move || key.clone())
}

/// Callback that always hands out `key`.
pub fn fixed_private(key: RsaPrivateKey) -> PrivateKeyFn {
    Arc::new(move || key.clone())
}

/// Both callbacks for one key pair.
pub fn fixed_pair(private: RsaPrivateKey) -> (PublicKeyFn, PrivateKeyFn) {
    let public = RsaPublicKey::from(&private);
    (fixed_public(public), fixed_private(private))
}
