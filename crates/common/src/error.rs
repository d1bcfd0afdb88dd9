//! Error type returned by every codec operation.

use thiserror::Error;

/// Opaque code shared by every rejected token.
pub const INVALID_TOKEN_CODE: &str = "invalid_token";

/// Top-level codec error type.
///
/// Variants map to public codes via [`CodecError::public_code`]:
/// - [`CodecError::MalformedToken`] and [`CodecError::Authentication`] → `invalid_token`
/// - [`CodecError::Serialization`] → `serialization_failed`
/// - [`CodecError::Deserialization`] → `deserialization_failed`
/// - [`CodecError::Entropy`] → `entropy_unavailable`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The payload format could not encode the caller's value.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Authenticated payload bytes are not valid in the payload format, or do
    /// not match the requested shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The token is structurally invalid: too short, bad hex, bad digest
    /// encoding, bad nonce, bad ciphertext length, or bad padding.
    #[error("malformed token: {0}")]
    MalformedToken(&'static str),

    /// The recomputed MAC does not match the digest embedded in the token.
    #[error("token authentication failed")]
    Authentication,

    /// The operating system randomness source failed.
    #[error("secure randomness unavailable: {0}")]
    Entropy(String),
}

impl CodecError {
    /// Returns the code that is safe to show to an external party.
    ///
    /// Malformed and unauthenticated tokens share one code so that callers
    /// cannot be used as an oracle on which check failed.
    pub fn public_code(&self) -> &'static str {
        match self {
            CodecError::MalformedToken(_) | CodecError::Authentication => INVALID_TOKEN_CODE,
            CodecError::Serialization(_) => "serialization_failed",
            CodecError::Deserialization(_) => "deserialization_failed",
            CodecError::Entropy(_) => "entropy_unavailable",
        }
    }

    /// Returns `true` if the token itself was rejected (malformed or forged).
    pub fn is_rejected_token(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedToken(_) | CodecError::Authentication
        )
    }
}
