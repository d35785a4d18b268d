use base64::DecodeError;
use secpref::{EncryptionError, SerializationError};
use thiserror::Error;

/// Failure of one stage of the encode or decode pipeline.
///
/// Only the `try_*` methods of
/// [`EncodingPipeline`](crate::EncodingPipeline) surface this type; the
/// fallback methods log it and return `None` or the caller's default.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// Stored text is not valid padded base64
    #[error("format: {0}")]
    Format(DecodeError),

    #[error("encryption: {0}")]
    Encryption(#[from] EncryptionError),

    #[error("serialization: {0}")]
    Serialization(#[from] SerializationError),
}

/// Errors of the persistent stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
