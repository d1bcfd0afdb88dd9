//! OpenSSL-compatible `EVP_BytesToKey` key stretching with MD5 and no salt.

use md5::{Digest, Md5};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Byte length of an AES-256 key.
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-CBC initialisation vector.
pub const IV_LEN: usize = 16;

/// Total bytes of key material derived per token.
pub const MATERIAL_LEN: usize = KEY_LEN + IV_LEN;

const MD5_LEN: usize = 16;

/// Stretch `password` into exactly `len` bytes.
///
/// `D1 = MD5(password)`, `Di = MD5(Di-1 ‖ password)`; the blocks are
/// concatenated and truncated to `len`. Equivalent to OpenSSL's
/// `EVP_BytesToKey` with MD5, one iteration, and no salt.
pub fn evp_bytes_to_key(password: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let blocks = len.div_ceil(MD5_LEN);
    let mut out = Zeroizing::new(Vec::with_capacity(blocks * MD5_LEN));
    let mut prev: Option<[u8; MD5_LEN]> = None;

    while out.len() < len {
        let mut hasher = Md5::new();
        if let Some(block) = prev {
            hasher.update(block);
        }
        hasher.update(password);
        let digest = hasher.finalize();
        let mut block = [0u8; MD5_LEN];
        block.copy_from_slice(&digest);
        out.extend_from_slice(&block);
        prev = Some(block);
    }
    if let Some(mut block) = prev {
        block.zeroize();
    }

    out.truncate(len);
    out
}

/// Per-token AES key and IV, wiped from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl KeyMaterial {
    /// Derive the key and IV for one token from `secret ‖ nonce`.
    pub fn derive(secret: &[u8], nonce: &[u8]) -> Self {
        let mut password = Zeroizing::new(Vec::with_capacity(secret.len() + nonce.len()));
        password.extend_from_slice(secret);
        password.extend_from_slice(nonce);

        let material = evp_bytes_to_key(&password, MATERIAL_LEN);
        let mut key = [0u8; KEY_LEN];
        let mut iv = [0u8; IV_LEN];
        key.copy_from_slice(&material[..KEY_LEN]);
        iv.copy_from_slice(&material[KEY_LEN..]);
        Self { key, iv }
    }

    /// The 32-byte AES-256 key.
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// The 16-byte CBC initialisation vector.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial([REDACTED])")
    }
}
