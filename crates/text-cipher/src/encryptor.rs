//! Instance-bound encryption behind an abstract capability interface.
//!
//! Consumers depend on `Arc<dyn TextEncryptor>` and never see the key.
//! [`Encryptor`] is the single implementation: it captures a key once and
//! forwards every call to the keyed functions in [`crate::cipher`], so tokens
//! from either form decrypt with the other.

use async_trait::async_trait;

use crate::cipher;
use crate::error::CipherError;
use crate::key::CipherKey;

/// Capability to encrypt and decrypt text under a fixed key.
///
/// Blank text is returned unchanged by every method.
#[async_trait]
pub trait TextEncryptor: Send + Sync {
    /// Encrypt `text` into a `base64(iv) + base64(ciphertext)` token.
    fn encrypt(&self, text: &str) -> Result<String, CipherError>;

    /// Decrypt a token produced by [`TextEncryptor::encrypt`].
    fn decrypt(&self, text: &str) -> Result<String, CipherError>;

    /// Async form of [`TextEncryptor::encrypt`].
    async fn encrypt_async(&self, text: &str) -> Result<String, CipherError>;

    /// Async form of [`TextEncryptor::decrypt`].
    async fn decrypt_async(&self, text: &str) -> Result<String, CipherError>;
}

/// AES-CBC text encryptor holding one key for its whole lifetime.
///
/// Cheap to share: the key is immutable and each call builds its own cipher
/// context and IV.
#[derive(Clone, Debug)]
pub struct Encryptor {
    key: CipherKey,
}

impl Encryptor {
    /// Create an encryptor bound to the UTF-8 bytes of `key`.
    ///
    /// The key length is not checked here; a bad length surfaces as
    /// [`CipherError::InvalidKeyLength`] on the first non-blank call.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self {
            key: CipherKey::new(key),
        }
    }

    /// Length of the bound key in bytes.
    pub fn key_len(&self) -> usize {
        self.key.len()
    }
}

#[async_trait]
impl TextEncryptor for Encryptor {
    fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        cipher::encrypt_with(text, self.key.as_bytes())
    }

    fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        cipher::decrypt_with(text, self.key.as_bytes())
    }

    async fn encrypt_async(&self, text: &str) -> Result<String, CipherError> {
        cipher::encrypt_async_with(text, self.key.as_bytes()).await
    }

    async fn decrypt_async(&self, text: &str) -> Result<String, CipherError> {
        cipher::decrypt_async_with(text, self.key.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const KEY: &str = "0123456789abcdef";

    #[test]
    fn instance_round_trip() {
        let enc = Encryptor::new(KEY);
        let token = enc.encrypt("hello world").unwrap();
        assert_ne!(token, "hello world");
        assert_eq!(enc.decrypt(&token).unwrap(), "hello world");
    }

    #[test]
    fn instance_and_free_functions_interoperate() {
        let enc = Encryptor::new(KEY);
        let from_instance = enc.encrypt("cross form").unwrap();
        let from_free = cipher::encrypt("cross form", KEY).unwrap();
        assert_eq!(cipher::decrypt(&from_instance, KEY).unwrap(), "cross form");
        assert_eq!(enc.decrypt(&from_free).unwrap(), "cross form");
    }

    #[test]
    fn blank_passes_through() {
        let enc = Encryptor::new(KEY);
        assert_eq!(enc.encrypt("   ").unwrap(), "   ");
        assert_eq!(enc.decrypt("").unwrap(), "");
    }

    #[test]
    fn bad_key_fails_on_first_use_not_construction() {
        let enc = Encryptor::new("short");
        assert_eq!(enc.key_len(), 5);
        assert!(matches!(
            enc.encrypt("x").unwrap_err(),
            CipherError::InvalidKeyLength(5)
        ));
    }

    #[test]
    fn debug_hides_key() {
        let enc = Encryptor::new(KEY);
        assert!(!format!("{enc:?}").contains(KEY));
    }

    #[tokio::test]
    async fn async_round_trip_through_trait_object() {
        let enc: Arc<dyn TextEncryptor> = Arc::new(Encryptor::new(KEY));
        let token = enc.encrypt_async("hello world").await.unwrap();
        assert_eq!(enc.decrypt_async(&token).await.unwrap(), "hello world");
        assert_eq!(enc.decrypt(&token).unwrap(), "hello world");
    }

    #[tokio::test]
    async fn concurrent_use_of_one_instance() {
        let enc = Arc::new(Encryptor::new(KEY));
        let mut handles = Vec::new();
        for i in 0..16 {
            let enc = Arc::clone(&enc);
            handles.push(tokio::spawn(async move {
                let text = format!("message {i}");
                let token = enc.encrypt_async(&text).await.unwrap();
                assert_eq!(enc.decrypt_async(&token).await.unwrap(), text);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
    }
}
