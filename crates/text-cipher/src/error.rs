//! Errors produced by the cipher layer.

use thiserror::Error;

use crate::token::{IV_B64_LEN, IV_LEN};

/// Errors produced while sealing or opening a text token.
///
/// None of these are raised for blank input, which is passed through as-is.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is not a valid AES key size (16, 24 or 32 bytes).
    #[error("invalid key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    /// The token is too short to contain the base64-encoded IV.
    #[error("token too short: {0} chars (need at least {IV_B64_LEN})")]
    TokenTooShort(usize),

    /// Either the IV or the ciphertext segment is not valid standard base64.
    #[error("invalid base64 in token: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The IV segment decoded to the wrong number of bytes.
    #[error("invalid IV length: expected {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    /// The ciphertext is empty or not a whole number of AES blocks.
    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    MisalignedCiphertext(usize),

    /// PKCS7 unpadding failed. Usually a wrong key or a modified token.
    #[error("invalid padding (wrong key or tampered token)")]
    Padding,

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8,

    /// Moving bytes through the async I/O interface failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CipherError {
    /// Returns `true` when the failure comes from the configured key rather
    /// than from the token being decrypted.
    pub fn is_key_error(&self) -> bool {
        matches!(self, CipherError::InvalidKeyLength(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_errors_are_classified() {
        assert!(CipherError::InvalidKeyLength(5).is_key_error());
        assert!(!CipherError::Padding.is_key_error());
        assert!(!CipherError::TokenTooShort(3).is_key_error());
    }

    #[test]
    fn display_includes_lengths() {
        let e = CipherError::InvalidKeyLength(7);
        assert!(e.to_string().contains("7 bytes"));
        let e = CipherError::TokenTooShort(10);
        assert!(e.to_string().contains("10 chars"));
        assert!(e.to_string().contains("24"));
    }
}
