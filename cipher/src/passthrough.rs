use secpref::{EncryptionAlgorithm, EncryptionError};

/// Identity "encryption". Stored values are only base64 encoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Passthrough;

impl EncryptionAlgorithm for Passthrough {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        Ok(plaintext.to_vec())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        Ok(ciphertext.to_vec())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use secpref::EncryptionAlgorithm;

    use super::Passthrough;

    #[rstest]
    #[case::empty(b"")]
    #[case::text(b"preferences")]
    fn test_passthrough_is_identity(#[case] input: &[u8]) {
        assert_eq!(input, Passthrough.encrypt(input).unwrap().as_slice());
        assert_eq!(input, Passthrough.decrypt(input).unwrap().as_slice());
    }
}
