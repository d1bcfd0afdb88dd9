//! # secure-serializer
//!
//! Authenticated, encrypted serialization of structured values into single
//! opaque text tokens, suitable for session cookies and signed tickets.
//!
//! ## Token format
//!
//! ```text
//! <28-char url-safe base64 HMAC-SHA1><8-char alnum nonce><hex AES-256-CBC ciphertext>
//! ```
//!
//! - The AES key and IV come from `EVP_BytesToKey-MD5(encrypt_key ‖ nonce_crypt)`.
//! - The ciphertext covers `nonce_check ‖ payload`, PKCS#7 padded.
//! - The MAC covers `payload` under `validate_key ‖ nonce_check`.
//!
//! ## Example
//!
//! ```rust
//! use secure_serializer::SecureSerializer;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let serializer = SecureSerializer::new("somesecretkey", "anothersecretstring");
//!
//! let mut data = HashMap::new();
//! data.insert("foo".to_string(), "bar".to_string());
//!
//! let token = serializer.encode(&data)?;
//! let back: HashMap<String, String> = serializer.decode(&token)?;
//! assert_eq!(back, data);
//! # Ok(())
//! # }
//! ```
//!
//! ## Security considerations
//!
//! - Keys are supplied by the caller; this crate neither generates nor rotates them.
//! - Treat [`CodecError::MalformedToken`] and [`CodecError::Authentication`] the
//!   same towards external parties; [`CodecError::public_code`] does this.
//! - The MD5 key derivation exists for wire compatibility, not strength.

pub mod crypto;
pub mod format;
pub mod nonce;
pub mod secret;
pub mod serializer;
pub mod token;

pub use common::CodecError;
pub use format::{Json, PayloadFormat};
pub use serializer::SecureSerializer;
pub use token::Token;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Shorthand for `SecureSerializer::new(encrypt_key, validate_key).encode(value)`.
pub fn secure_encode<T: Serialize + ?Sized>(
    value: &T,
    encrypt_key: impl AsRef<[u8]>,
    validate_key: impl AsRef<[u8]>,
) -> Result<String, CodecError> {
    SecureSerializer::new(encrypt_key, validate_key).encode(value)
}

/// Shorthand for `SecureSerializer::new(encrypt_key, validate_key).decode(token)`.
pub fn secure_decode<T: DeserializeOwned>(
    token: &str,
    encrypt_key: impl AsRef<[u8]>,
    validate_key: impl AsRef<[u8]>,
) -> Result<T, CodecError> {
    SecureSerializer::new(encrypt_key, validate_key).decode(token)
}
