//! # secpref
//!
//! Capability traits for storing encrypted values in string-keyed
//! preference stores.
//!
//! ## Overview
//!
//! A value travels through three capabilities on its way to a store:
//! ```text
//! T → ValueCodec → Vec<u8> → EncryptionAlgorithm → Vec<u8> → base64 → PreferenceStore
//! ```
//!
//! This crate only defines the seams. Concrete algorithms live in the
//! `secpref-cipher` crate and the encoding pipeline that wires everything
//! together lives in `secpref-pipeline`.
//!
//! ## Example
//!
//! ```
//! use secpref::algorithm::EncryptionAlgorithm;
//! use secpref::error::EncryptionError;
//!
//! struct Reverse;
//!
//! impl EncryptionAlgorithm for Reverse {
//!     fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
//!         Ok(plaintext.iter().rev().copied().collect())
//!     }
//!
//!     fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
//!         Ok(ciphertext.iter().rev().copied().collect())
//!     }
//! }
//!
//! let ct = Reverse.encrypt(b"abc").unwrap();
//! assert_eq!(Reverse.decrypt(&ct).unwrap(), b"abc");
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod store;

pub use algorithm::EncryptionAlgorithm;
pub use codec::ValueCodec;
pub use error::{EncryptionError, SerializationError};
pub use store::{PreferenceEditor, PreferenceStore};
