//! Wire format of an encrypted text value.
//!
//! ```text
//! <base64(iv)><base64(ciphertext)>
//! ```
//!
//! Both segments use standard padded base64 and are concatenated with no
//! separator. A 16-byte IV always encodes to exactly [`IV_B64_LEN`] chars, so
//! the split point is fixed. There is no version tag and no MAC: a token is
//! not tamper-evident.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::CipherError;

/// Byte length of the AES-CBC initialisation vector.
pub const IV_LEN: usize = 16;

/// Length of the base64-encoded IV prefix of every token.
pub const IV_B64_LEN: usize = 24;

/// A parsed token: the IV and the raw ciphertext bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// IV used for this message only.
    pub iv: [u8; IV_LEN],
    /// PKCS7-padded AES-CBC ciphertext.
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD.encode(self.iv))?;
        f.write_str(&STANDARD.encode(&self.ciphertext))
    }
}

impl FromStr for Token {
    type Err = CipherError;

    /// Split off the first [`IV_B64_LEN`] chars as the IV and decode both
    /// segments.
    ///
    /// The ciphertext may come back empty here; the cipher rejects it later.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::TokenTooShort`], [`CipherError::InvalidBase64`]
    /// or [`CipherError::InvalidIvLength`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.as_bytes();
        if raw.len() < IV_B64_LEN {
            return Err(CipherError::TokenTooShort(raw.len()));
        }
        // Split on bytes: a multi-byte char near the boundary is just invalid base64.
        let (iv_b64, ciphertext_b64) = raw.split_at(IV_B64_LEN);

        let iv_bytes = STANDARD.decode(iv_b64)?;
        let iv: [u8; IV_LEN] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CipherError::InvalidIvLength(iv_bytes.len()))?;

        let ciphertext = STANDARD.decode(ciphertext_b64)?;
        Ok(Self { iv, ciphertext })
    }
}
