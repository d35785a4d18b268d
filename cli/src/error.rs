use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex key: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("encryption error: {0}")]
    Encryption(#[from] secpref::EncryptionError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] secpref_pipeline::PipelineError),

    #[error("store error: {0}")]
    Store(#[from] secpref_pipeline::StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, Error>;
