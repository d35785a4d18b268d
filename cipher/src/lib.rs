//! Encryption algorithms pluggable into the secpref encoding pipeline.
//!
//! | algorithm                    | use |
//! |------------------------------|-----|
//! | [`AesGcmCipher`]             | AES-256-GCM with a random nonce per value |
//! | [`XorCipher`]                | repeating-key XOR, obfuscation and tests only |
//! | [`Passthrough`]              | no encryption at all |
//!
//! Keys are supplied by the caller. Nothing here derives, stores or rotates
//! them.

#![forbid(unsafe_code)]

mod gcm;
mod passthrough;
mod xor;

pub use gcm::{AesGcmCipher, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use passthrough::Passthrough;
pub use xor::XorCipher;
