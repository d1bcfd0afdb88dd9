//! [`SecureSerializer`]: seals structured values into tokens and opens them again.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use zeroize::Zeroizing;

use common::protocol::NONCE_LEN;
use common::CodecError;

use crate::crypto::cipher::{self, CipherError};
use crate::crypto::{mac, KeyMaterial};
use crate::format::{Json, PayloadFormat};
use crate::nonce::Nonce;
use crate::secret::SecretBytes;
use crate::token::Token;

/// Authenticated, encrypted serializer bound to an encryption secret and a
/// validation secret.
///
/// Holds no mutable state: one instance can be shared across threads and used
/// for any number of concurrent [`encode`](Self::encode) and
/// [`decode`](Self::decode) calls. All cipher and MAC state is derived per call.
#[derive(Clone, Debug)]
pub struct SecureSerializer<F = Json> {
    encrypt_key: SecretBytes,
    validate_key: SecretBytes,
    format: F,
}

impl SecureSerializer<Json> {
    /// Create a JSON serializer from the two secrets.
    pub fn new(encrypt_key: impl AsRef<[u8]>, validate_key: impl AsRef<[u8]>) -> Self {
        Self::with_format(encrypt_key, validate_key, Json)
    }
}

impl<F: PayloadFormat> SecureSerializer<F> {
    /// Create a serializer that encodes payloads with `format`.
    pub fn with_format(
        encrypt_key: impl AsRef<[u8]>,
        validate_key: impl AsRef<[u8]>,
        format: F,
    ) -> Self {
        Self {
            encrypt_key: SecretBytes::new(encrypt_key),
            validate_key: SecretBytes::new(validate_key),
            format,
        }
    }

    /// The payload format in use.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Serialize, encrypt, and sign `value`, returning the token string.
    ///
    /// Two calls with the same value return different tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Serialization`] if the format rejects `value` and
    /// [`CodecError::Entropy`] if the OS randomness source fails.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        let payload = Zeroizing::new(self.format.to_bytes(value)?);
        let nonce_check = Nonce::generate()?;
        let nonce_crypt = Nonce::generate()?;
        let token = self.seal(&payload, nonce_check, nonce_crypt)?;
        debug!(
            payload_len = payload.len(),
            token_len = token.len(),
            "payload sealed"
        );
        Ok(token)
    }

    /// Verify and decrypt `token`, then decode the payload as `T`.
    ///
    /// The MAC is checked before the payload format sees any bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedToken`] if the token is structurally
    /// invalid or does not decrypt to a well-padded envelope,
    /// [`CodecError::Authentication`] if the MAC does not match, and
    /// [`CodecError::Deserialization`] if the authenticated payload does not
    /// decode as `T`.
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, CodecError> {
        let payload = self.open(token)?;
        let value = self.format.from_bytes(&payload)?;
        debug!(payload_len = payload.len(), "token opened");
        Ok(value)
    }

    /// Build the token for already-serialized `payload` under fixed nonces.
    pub(crate) fn seal(
        &self,
        payload: &[u8],
        nonce_check: Nonce,
        nonce_crypt: Nonce,
    ) -> Result<String, CodecError> {
        let material = KeyMaterial::derive(self.encrypt_key.expose(), nonce_crypt.as_bytes());

        let mut envelope = Vec::with_capacity(NONCE_LEN + payload.len());
        envelope.extend_from_slice(nonce_check.as_bytes());
        envelope.extend_from_slice(payload);
        let ciphertext = cipher::encrypt(material.key(), material.iv(), envelope)?;

        let mac_key = mac::token_key(self.validate_key.expose(), nonce_check.as_bytes());
        let digest = mac::sign(payload, &mac_key);

        Ok(Token {
            digest,
            nonce_crypt,
            ciphertext,
        }
        .to_string_repr())
    }

    /// Parse, decrypt, and authenticate `token`, returning the payload bytes.
    fn open(&self, token: &str) -> Result<Zeroizing<Vec<u8>>, CodecError> {
        let token = Token::parse(token)?;
        let material =
            KeyMaterial::derive(self.encrypt_key.expose(), token.nonce_crypt.as_bytes());

        let envelope = Zeroizing::new(cipher::decrypt(
            material.key(),
            material.iv(),
            &token.ciphertext,
        )?);
        if envelope.len() < NONCE_LEN {
            return Err(CodecError::MalformedToken("envelope shorter than nonce"));
        }
        let (nonce_check, payload) = envelope.split_at(NONCE_LEN);

        let mac_key = mac::token_key(self.validate_key.expose(), nonce_check);
        if !mac::verify(payload, &mac_key, &token.digest) {
            return Err(CodecError::Authentication);
        }
        Ok(Zeroizing::new(payload.to_vec()))
    }
}

impl From<CipherError> for CodecError {
    fn from(err: CipherError) -> Self {
        CodecError::MalformedToken(match err {
            CipherError::InvalidKeyLength(_) => "invalid derived key length",
            CipherError::InvalidIvLength(_) => "invalid derived IV length",
            CipherError::InvalidCiphertextLength(_) => "invalid ciphertext length",
            CipherError::Padding(_) => "bad padding",
        })
    }
}
