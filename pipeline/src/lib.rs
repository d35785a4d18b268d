//! # secpref-pipeline
//!
//! Transparent encryption of serializable values kept in string-keyed
//! preference stores.
//!
//! A value is serialized by a [`ValueCodec`](secpref::ValueCodec) (JSON by
//! default), encrypted by the bound
//! [`EncryptionAlgorithm`](secpref::EncryptionAlgorithm), and stored as
//! standard padded base64. Reading runs the same stages backwards and falls
//! back to a caller supplied default if any of them fails.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use secpref_cipher::XorCipher;
//! use secpref_pipeline::EncodingPipeline;
//!
//! let pipeline = EncodingPipeline::new(XorCipher::new(b"key".to_vec()).unwrap());
//!
//! let encoded = pipeline.encode(Some(&42)).unwrap();
//! assert_eq!(42, pipeline.decode(Some(&encoded), 0));
//!
//! let mut store = HashMap::new();
//! store.insert("answer".to_string(), encoded);
//! assert_eq!(42, pipeline.read_and_decode(&store, "answer", 0));
//! assert_eq!(0, pipeline.read_and_decode(&store, "missing", 0));
//! ```

#![forbid(unsafe_code)]

pub mod error;
mod json;
mod pipeline;
mod preferences;
mod store;
mod text;

pub use error::{Error as PipelineError, StoreError};
pub use json::JsonCodec;
pub use pipeline::EncodingPipeline;
pub use preferences::SecurePreferences;
pub use store::{JsonFileStore, MemoryStore};
