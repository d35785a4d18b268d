//! Encryption capability consumed by the encoding pipeline.
//!
//! An algorithm is a pair of byte transformations. The pipeline never
//! looks inside the ciphertext; whatever `encrypt` returns is exactly what
//! `decrypt` receives on the read path.
//!
//! Implementations are shared across threads by the pipeline, hence the
//! `Send + Sync` bound.

use std::sync::Arc;

use crate::error::EncryptionError;

/// Symmetric byte transformation used to protect serialized values.
///
/// `decrypt(encrypt(x))` must yield `x` for every byte sequence `x`.
pub trait EncryptionAlgorithm: Send + Sync {
    /// Encrypts `plaintext` into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError`] when the algorithm cannot process the
    /// input, e.g. because its key is unusable.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError>;

    /// Decrypts `ciphertext` previously produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError`] for corrupted, truncated or foreign
    /// ciphertext.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError>;

    /// Short human readable name used in log records.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<A: EncryptionAlgorithm + ?Sized> EncryptionAlgorithm for &A {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        (**self).decrypt(ciphertext)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<A: EncryptionAlgorithm + ?Sized> EncryptionAlgorithm for Box<A> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        (**self).decrypt(ciphertext)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<A: EncryptionAlgorithm + ?Sized> EncryptionAlgorithm for Arc<A> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        (**self).decrypt(ciphertext)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
