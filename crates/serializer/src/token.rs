//! Token text layout: `<digest><nonce_crypt><cipher_hex>`.
//!
//! The digest is the 20-byte MAC in URL-safe base64 *with* its `=` pad
//! (exactly 28 characters); the nonce is 8 alphanumeric characters; the rest
//! is the ciphertext in hex.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};

use common::protocol::{DIGEST_LEN, MAC_LEN, MIN_TOKEN_LEN, NONCE_LEN};
use common::CodecError;

use crate::nonce::Nonce;

/// A parsed token. Parsing validates structure only; nothing is authenticated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw MAC bytes.
    pub digest: [u8; MAC_LEN],
    /// Nonce the encryption key and IV are derived from.
    pub nonce_crypt: Nonce,
    /// Raw ciphertext bytes.
    pub ciphertext: Vec<u8>,
}

impl Token {
    /// Encode this token to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        let mut out = String::with_capacity(MIN_TOKEN_LEN + 2 * self.ciphertext.len());
        URL_SAFE.encode_string(self.digest, &mut out);
        // Nonce bytes are always ASCII alphanumerics.
        out.extend(self.nonce_crypt.as_bytes().iter().map(|&b| char::from(b)));
        out.push_str(&hex::encode(&self.ciphertext));
        out
    }

    /// Parse a token string.
    ///
    /// Works on raw bytes, so non-ASCII input can never split a character.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedToken`] if the token is shorter than
    /// [`MIN_TOKEN_LEN`], the ciphertext is not even-length hex, the digest is
    /// not 28 characters of URL-safe base64 encoding 20 bytes, or the nonce is
    /// not alphanumeric.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let bytes = s.as_bytes();
        if bytes.len() < MIN_TOKEN_LEN {
            return Err(CodecError::MalformedToken("token too short"));
        }

        let (digest_b64, rest) = bytes.split_at(DIGEST_LEN);
        let (nonce_bytes, cipher_hex) = rest.split_at(NONCE_LEN);

        let ciphertext = hex::decode(cipher_hex)
            .map_err(|_| CodecError::MalformedToken("ciphertext is not valid hex"))?;

        let digest_vec = URL_SAFE
            .decode(digest_b64)
            .map_err(|_| CodecError::MalformedToken("digest is not valid base64"))?;
        let digest: [u8; MAC_LEN] = digest_vec
            .try_into()
            .map_err(|_| CodecError::MalformedToken("digest has wrong length"))?;

        let nonce_crypt = Nonce::from_bytes(nonce_bytes)
            .ok_or(CodecError::MalformedToken("nonce is not alphanumeric"))?;

        Ok(Self {
            digest,
            nonce_crypt,
            ciphertext,
        })
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_repr())
    }
}

impl std::str::FromStr for Token {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
