//! Printable text layer: ciphertext bytes to standard padded base64.
//!
//! Output is a single line; no wrapping is applied. Input must be canonical
//! padded base64 without whitespace.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::Error;

pub(crate) fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub(crate) fn decode(text: &str) -> Result<Vec<u8>, Error> {
    STANDARD.decode(text).map_err(Error::Format)
}
