use std::fmt::{Debug, Formatter};

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use secpref::{EncryptionAlgorithm, EncryptionError};

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM.
///
/// Every call to `encrypt` draws a fresh random nonce from the OS and
/// returns `nonce || ciphertext || tag`, so encrypting the same value twice
/// yields different output. Tampering with any byte makes `decrypt` fail.
#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    /// Builds the cipher from a raw 32 byte key.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::InvalidKey`] if `key` is not [`KEY_LEN`]
    /// bytes long.
    pub fn new(key: &[u8]) -> Result<Self, EncryptionError> {
        if key.len() != KEY_LEN {
            return Err(EncryptionError::InvalidKey(format!(
                "aes-256-gcm needs a {KEY_LEN} byte key, got {}",
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| EncryptionError::InvalidKey(e.to_string()))?;
        Ok(AesGcmCipher { cipher })
    }
}

impl Debug for AesGcmCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmCipher").finish_non_exhaustive()
    }
}

impl EncryptionAlgorithm for AesGcmCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| EncryptionError::Encrypt(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        let min = NONCE_LEN + TAG_LEN;
        if ciphertext.len() < min {
            return Err(EncryptionError::CiphertextTooShort {
                len: ciphertext.len(),
                min,
            });
        }
        let (nonce, sealed) = ciphertext.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|e| EncryptionError::Decrypt(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }
}
