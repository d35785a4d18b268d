use std::sync::Arc;

use clap::Args;
use secpref::EncryptionAlgorithm;
use secpref_cipher::{AesGcmCipher, Passthrough, XorCipher};
use secpref_pipeline::EncodingPipeline;

use crate::error::{Error, Result};

#[derive(Args)]
pub(crate) struct AlgorithmArgs {
    /// Encryption algorithm applied to stored values
    #[arg(short = 'c', long, value_enum, default_value_t = CipherKind::AesGcm)]
    cipher: CipherKind,

    /// Hex encoded key (32 bytes for aes-gcm, any length for xor)
    #[arg(
        id = "cipher_key",
        short = 'k',
        long = "key",
        env = "SECPREF_KEY",
        hide_env_values = true
    )]
    key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum CipherKind {
    Passthrough,
    Xor,
    AesGcm,
}

impl AlgorithmArgs {
    fn key_bytes(&self) -> Result<Vec<u8>> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("--key (or SECPREF_KEY) is required".to_string()))?;
        Ok(hex::decode(key.trim())?)
    }

    pub(crate) fn algorithm(&self) -> Result<Arc<dyn EncryptionAlgorithm>> {
        let algorithm: Arc<dyn EncryptionAlgorithm> = match self.cipher {
            CipherKind::Passthrough => Arc::new(Passthrough),
            CipherKind::Xor => Arc::new(XorCipher::new(self.key_bytes()?)?),
            CipherKind::AesGcm => Arc::new(AesGcmCipher::new(&self.key_bytes()?)?),
        };
        tracing::debug!(algorithm = algorithm.name(), "algorithm selected");
        Ok(algorithm)
    }

    pub(crate) fn pipeline(&self) -> Result<EncodingPipeline> {
        Ok(EncodingPipeline::from_shared(
            self.algorithm()?,
            Default::default(),
        ))
    }
}
