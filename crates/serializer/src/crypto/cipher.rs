//! AES-256-CBC encryption and decryption of the plaintext envelope.
//!
//! Padding is applied here with [`super::padding`] rather than by the `cbc`
//! crate, so every rejection on decrypt maps to one of our own error variants.
//!
//! **Do NOT switch to a stream mode for some tokens only.** Tokens produced in
//! one mode cannot be decoded in another.

use aes::Aes256;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use thiserror::Error;

use super::kdf::{IV_LEN, KEY_LEN};
use super::padding::{self, PaddingError, BLOCK_SIZE};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The key is not [`KEY_LEN`] bytes.
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The IV is not [`IV_LEN`] bytes.
    #[error("invalid IV length: expected {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    /// The ciphertext is empty or not a whole number of blocks.
    #[error("ciphertext length {0} is not a positive multiple of {BLOCK_SIZE}")]
    InvalidCiphertextLength(usize),

    /// Decryption succeeded but the padding is invalid.
    #[error("bad padding: {0}")]
    Padding(#[from] PaddingError),
}

/// Pad and encrypt `plaintext` under AES-256-CBC.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] or [`CipherError::InvalidIvLength`]
/// if `key` or `iv` have the wrong size.
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: Vec<u8>) -> Result<Vec<u8>, CipherError> {
    let encryptor = build_encryptor(key, iv)?;
    let mut buf = padding::pad(plaintext, BLOCK_SIZE);
    let len = buf.len();
    encryptor
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .map_err(|_| CipherError::InvalidCiphertextLength(len))?;
    Ok(buf)
}

/// Decrypt AES-256-CBC `ciphertext` and strip its padding.
///
/// # Errors
///
/// Returns [`CipherError::InvalidCiphertextLength`] if the ciphertext is empty
/// or not block aligned, [`CipherError::Padding`] if the decrypted padding is
/// invalid (wrong key or tampered data), and the key/IV length errors of
/// [`encrypt`].
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidCiphertextLength(ciphertext.len()));
    }
    let decryptor = build_decryptor(key, iv)?;
    let mut buf = ciphertext.to_vec();
    let plaintext = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| CipherError::InvalidCiphertextLength(ciphertext.len()))?;
    let body = padding::unpad(plaintext, BLOCK_SIZE)?;
    Ok(body.to_vec())
}

fn check_lengths(key: &[u8], iv: &[u8]) -> Result<(), CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(key.len()));
    }
    if iv.len() != IV_LEN {
        return Err(CipherError::InvalidIvLength(iv.len()));
    }
    Ok(())
}

fn build_encryptor(key: &[u8], iv: &[u8]) -> Result<Aes256CbcEnc, CipherError> {
    check_lengths(key, iv)?;
    Aes256CbcEnc::new_from_slices(key, iv).map_err(|_| CipherError::InvalidKeyLength(key.len()))
}

fn build_decryptor(key: &[u8], iv: &[u8]) -> Result<Aes256CbcDec, CipherError> {
    check_lengths(key, iv)?;
    Aes256CbcDec::new_from_slices(key, iv).map_err(|_| CipherError::InvalidKeyLength(key.len()))
}
