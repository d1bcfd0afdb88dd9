//! Token layout constants and the error body emitted by token-facing tools.
//!
//! ```text
//! <digest: 28 chars url-safe base64><nonce: 8 alnum chars><ciphertext: even-length hex>
//! ```

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Token layout
// ---------------------------------------------------------------------------

/// Byte length of the raw HMAC-SHA1 digest.
pub const MAC_LEN: usize = 20;

/// Character length of the base64-encoded digest at the start of a token.
pub const DIGEST_LEN: usize = 28;

/// Length of both per-token nonces (`nonce_check` and `nonce_crypt`).
pub const NONCE_LEN: usize = 8;

/// Shortest string that can possibly be a token.
pub const MIN_TOKEN_LEN: usize = DIGEST_LEN + NONCE_LEN;

/// Alphabet the nonces are drawn from.
pub const NONCE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body written when a token operation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"invalid_token"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build the externally visible response for a codec error.
    ///
    /// The message never carries the internal reason for a rejected token.
    pub fn from_codec_error(err: &crate::CodecError) -> Self {
        let message = if err.is_rejected_token() {
            "token is invalid".to_string()
        } else {
            err.to_string()
        };
        Self::new(err.public_code(), message)
    }
}
