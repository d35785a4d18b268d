use std::fmt::{Debug, Formatter};

use secpref::{EncryptionAlgorithm, EncryptionError};

/// Repeating-key XOR.
///
/// Encrypt and decrypt are the same operation. This hides values from a
/// casual look at the store and nothing more.
#[derive(Clone, PartialEq, Eq)]
pub struct XorCipher {
    key: Vec<u8>,
}

impl XorCipher {
    /// # Errors
    ///
    /// Returns [`EncryptionError::InvalidKey`] for an empty key.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, EncryptionError> {
        let key = key.into();
        if key.is_empty() {
            return Err(EncryptionError::InvalidKey(
                "xor key must not be empty".to_string(),
            ));
        }
        Ok(XorCipher { key })
    }

    fn apply(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }
}

impl Debug for XorCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XorCipher")
            .field("key_len", &self.key.len())
            .finish()
    }
}

impl EncryptionAlgorithm for XorCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        Ok(self.apply(plaintext))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        Ok(self.apply(ciphertext))
    }

    fn name(&self) -> &'static str {
        "xor"
    }
}
