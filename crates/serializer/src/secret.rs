//! [`SecretBytes`]: caller-supplied key material held by a serializer.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned secret bytes that are wiped from memory on drop.
///
/// Cloned along with the serializer that owns it; every clone is wiped
/// independently.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Box<[u8]>);

impl SecretBytes {
    /// Copy `bytes` into a new secret buffer.
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self(bytes.as_ref().into())
    }

    /// Borrow the secret bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("SecretBytes([REDACTED])")
    }
}
