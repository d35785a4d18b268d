use thiserror::Error;

/// Errors raised by an [`EncryptionAlgorithm`](crate::EncryptionAlgorithm).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EncryptionError {
    /// The key cannot be used by the algorithm (wrong length, empty, ...)
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("encrypt: {0}")]
    Encrypt(String),

    /// Ciphertext was rejected (bad tag, corrupted data, wrong key)
    #[error("decrypt: {0}")]
    Decrypt(String),

    #[error("ciphertext too short: got {len} bytes, need at least {min}")]
    CiphertextTooShort { len: usize, min: usize },
}

/// Errors raised by a [`ValueCodec`](crate::ValueCodec).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SerializationError {
    #[error("serialize: {0}")]
    Serialize(String),

    /// Payload is malformed, truncated, or does not match the target type
    #[error("deserialize: {0}")]
    Deserialize(String),
}
