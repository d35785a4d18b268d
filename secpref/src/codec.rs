//! Serialization capability: typed values to bytes and back.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::SerializationError;

/// Converts values of any serde type into a byte payload and back.
///
/// The payload format is owned by the codec. A codec must be able to read
/// everything it writes; reading bytes produced by another codec is allowed
/// to fail with [`SerializationError::Deserialize`].
pub trait ValueCodec {
    /// Serializes `value` into a byte payload.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::Serialize`] when the value cannot be
    /// represented in the codec's format.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializationError>;

    /// Reconstructs a value of type `T` from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::Deserialize`] for malformed or
    /// truncated payloads and for payloads of an incompatible type.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError>;
}

impl<C: ValueCodec + ?Sized> ValueCodec for &C {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializationError> {
        (**self).serialize(value)
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError> {
        (**self).deserialize(bytes)
    }
}
