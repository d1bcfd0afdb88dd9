//! Per-token alphanumeric nonces.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use common::protocol::{NONCE_ALPHABET, NONCE_LEN};
use common::CodecError;

/// Largest multiple of 62 that fits in a byte; bytes at or above it are
/// discarded so every symbol is equally likely.
const REJECT_AT: u8 = (256 / NONCE_ALPHABET.len() * NONCE_ALPHABET.len()) as u8;

/// An 8-character nonce drawn uniformly from `[0-9A-Za-z]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Draw a fresh nonce from the operating system CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Entropy`] if the OS randomness source fails.
    pub fn generate() -> Result<Self, CodecError> {
        Self::generate_with(&mut OsRng)
    }

    /// Draw a fresh nonce from `rng` using rejection sampling.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Entropy`] if `rng` reports a failure.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, CodecError> {
        let mut out = [0u8; NONCE_LEN];
        let mut filled = 0;
        let mut pool = [0u8; 2 * NONCE_LEN];

        while filled < NONCE_LEN {
            rng.try_fill_bytes(&mut pool)
                .map_err(|e| CodecError::Entropy(e.to_string()))?;
            for &byte in pool.iter().filter(|&&b| b < REJECT_AT) {
                if filled == NONCE_LEN {
                    break;
                }
                out[filled] = NONCE_ALPHABET[usize::from(byte) % NONCE_ALPHABET.len()];
                filled += 1;
            }
        }
        Ok(Self(out))
    }

    /// Wrap nonce bytes read from a token, rejecting anything outside the alphabet.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != NONCE_LEN || !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return None;
        }
        let mut out = [0u8; NONCE_LEN];
        out.copy_from_slice(bytes);
        Some(Self(out))
    }

    /// The nonce characters as ASCII bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
