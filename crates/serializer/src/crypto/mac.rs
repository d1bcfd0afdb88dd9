//! HMAC-SHA1 message authentication.
//!
//! The MAC key for a token is `validate_key ‖ nonce_check`, so the digest is
//! bound to both the static secret and the per-token nonce.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use common::protocol::MAC_LEN;

type HmacSha1 = Hmac<Sha1>;

/// Compute HMAC-SHA1 of `message` under `key`.
pub fn sign(message: &[u8], key: &[u8]) -> [u8; MAC_LEN] {
    let mut mac = match HmacSha1::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(message);
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; MAC_LEN];
    out.copy_from_slice(&tag);
    out
}

/// Recompute the MAC of `message` and compare it to `expected` in constant time.
pub fn verify(message: &[u8], key: &[u8], expected: &[u8]) -> bool {
    let actual = Zeroizing::new(sign(message, key));
    actual[..].ct_eq(expected).into()
}

/// Build the per-token MAC key `validate_key ‖ nonce_check`.
pub fn token_key(validate_key: &[u8], nonce_check: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(Vec::with_capacity(validate_key.len() + nonce_check.len()));
    key.extend_from_slice(validate_key);
    key.extend_from_slice(nonce_check);
    key
}
