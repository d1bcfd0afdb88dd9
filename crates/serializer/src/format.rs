//! Payload formats: how structured values become the bytes that get sealed.
//!
//! The codec only needs a symmetric pair of operations; any format whose
//! `from_bytes(to_bytes(v)) == v` holds can be plugged in.

use serde::de::DeserializeOwned;
use serde::Serialize;

use common::CodecError;

/// A symmetric structured-data encoding.
pub trait PayloadFormat {
    /// Encode `value` to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Serialization`] if the value cannot be encoded.
    fn to_bytes<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode `bytes` into the caller's requested shape `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Deserialization`] if the bytes are invalid or do
    /// not match `T`.
    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// Compact JSON, byte-compatible with other producers of this token format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Json;

impl PayloadFormat for Json {
    fn to_bytes<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Serialization(e.to_string()))
    }

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Deserialization(e.to_string()))
    }
}
