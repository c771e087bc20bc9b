//! [`CipherKey`]: owned key material for an [`Encryptor`](crate::Encryptor).

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw key bytes taken verbatim from the UTF-8 encoding of a key string.
///
/// No length check happens here; the cipher rejects unsupported sizes when a
/// context is built. The buffer is wiped when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey(Box<[u8]>);

impl CipherKey {
    /// Build a key from the UTF-8 bytes of `key`.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().as_bytes().into())
    }

    /// Key bytes as handed to the cipher.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of key bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty key string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only the length is shown.
        write!(f, "CipherKey([REDACTED; {}])", self.0.len())
    }
}
