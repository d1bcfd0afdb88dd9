//! Cryptographic building blocks of the token scheme.
//!
//! This module is free of any payload-format or token-layout knowledge. It
//! provides the key derivation, padding, block cipher, and MAC primitives the
//! codec composes.
//!
//! # Scheme
//!
//! ```text
//! key ‖ iv   = EVP_BytesToKey-MD5(encrypt_key ‖ nonce_crypt, 48)
//! ciphertext = AES-256-CBC(key, iv, PKCS#7(nonce_check ‖ payload))
//! digest     = HMAC-SHA1(validate_key ‖ nonce_check, payload)
//! ```
//!
//! The MD5-based derivation is kept for wire compatibility with existing
//! token producers. Replacing it changes the token format.

pub mod cipher;
pub mod kdf;
pub mod mac;
pub mod padding;

pub use kdf::KeyMaterial;
