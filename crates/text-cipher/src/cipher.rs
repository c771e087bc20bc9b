//! AES-CBC encryption and decryption of text values.
//!
//! Key size selects the AES variant: 16, 24 or 32 key bytes give AES-128,
//! AES-192 or AES-256. Padding is PKCS7. Every seal draws a fresh 16-byte IV
//! from the OS CSPRNG, so identical text + key never yields the same token
//! twice.
//!
//! CBC has no authentication tag. A wrong key or a modified token almost
//! always fails the padding or UTF-8 check, but nothing guarantees it.
//!
//! Blank text (empty or whitespace-only) is returned unchanged by every entry
//! point, before the key is even looked at.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{
    block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyIvInit,
};
use rand::{rngs::OsRng, RngCore};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::trace;

use crate::error::CipherError;
use crate::token::{Token, IV_LEN};

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES variant chosen from the key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Pick the AES variant for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] for anything but 16, 24 or 32 bytes.
    pub fn for_key(key: &[u8]) -> Result<Self, CipherError> {
        match key.len() {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            n => Err(CipherError::InvalidKeyLength(n)),
        }
    }

    /// Key size in bits.
    pub fn bits(self) -> u32 {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }
}

/// Whether `text` is passed through untouched: empty or only whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Encrypt `text` under `key`, returning a `base64(iv) + base64(ciphertext)` token.
///
/// Blank `text` is returned unchanged.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not 16, 24 or 32 UTF-8 bytes.
pub fn encrypt(text: &str, key: &str) -> Result<String, CipherError> {
    encrypt_with(text, key.as_bytes())
}

/// Decrypt a token produced by [`encrypt`].
///
/// Blank `token` is returned unchanged.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] for a bad key, and a format,
/// padding or UTF-8 error for a malformed token or the wrong key.
pub fn decrypt(token: &str, key: &str) -> Result<String, CipherError> {
    decrypt_with(token, key.as_bytes())
}

/// Async form of [`encrypt`]; the plaintext is written through tokio's
/// [`AsyncWrite`](tokio::io::AsyncWrite) interface.
pub async fn encrypt_async(text: &str, key: &str) -> Result<String, CipherError> {
    encrypt_async_with(text, key.as_bytes()).await
}

/// Async form of [`decrypt`]; the plaintext is read back through tokio's
/// [`AsyncRead`](tokio::io::AsyncRead) interface.
pub async fn decrypt_async(token: &str, key: &str) -> Result<String, CipherError> {
    decrypt_async_with(token, key.as_bytes()).await
}

/// [`encrypt`] lifted over an optional value: `None` stays `None`.
pub fn encrypt_opt(text: Option<&str>, key: &str) -> Result<Option<String>, CipherError> {
    text.map(|t| encrypt(t, key)).transpose()
}

/// [`decrypt`] lifted over an optional value: `None` stays `None`.
pub fn decrypt_opt(token: Option<&str>, key: &str) -> Result<Option<String>, CipherError> {
    token.map(|t| decrypt(t, key)).transpose()
}

pub(crate) fn encrypt_with(text: &str, key: &[u8]) -> Result<String, CipherError> {
    if is_blank(text) {
        return Ok(text.to_owned());
    }
    let size = KeySize::for_key(key)?;
    let token = seal(size, key, text.as_bytes())?;
    Ok(token.to_string())
}

pub(crate) fn decrypt_with(token: &str, key: &[u8]) -> Result<String, CipherError> {
    if is_blank(token) {
        return Ok(token.to_owned());
    }
    let size = KeySize::for_key(key)?;
    let plaintext = open(size, key, &token.parse::<Token>()?)?;
    String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
}

pub(crate) async fn encrypt_async_with(text: &str, key: &[u8]) -> Result<String, CipherError> {
    if is_blank(text) {
        return Ok(text.to_owned());
    }
    let size = KeySize::for_key(key)?;

    let mut plaintext = Vec::with_capacity(text.len());
    plaintext.write_all(text.as_bytes()).await?;
    plaintext.flush().await?;

    let token = seal(size, key, &plaintext)?;
    Ok(token.to_string())
}

pub(crate) async fn decrypt_async_with(token: &str, key: &[u8]) -> Result<String, CipherError> {
    if is_blank(token) {
        return Ok(token.to_owned());
    }
    let size = KeySize::for_key(key)?;
    let plaintext = open(size, key, &token.parse::<Token>()?)?;

    let mut text = String::with_capacity(plaintext.len());
    plaintext
        .as_slice()
        .read_to_string(&mut text)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => CipherError::InvalidUtf8,
            _ => CipherError::Io(e),
        })?;
    Ok(text)
}

/// Encrypt `plaintext` under a freshly generated IV.
fn seal(size: KeySize, key: &[u8], plaintext: &[u8]) -> Result<Token, CipherError> {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    seal_with_iv(size, key, iv, plaintext)
}

fn seal_with_iv(
    size: KeySize,
    key: &[u8],
    iv: [u8; IV_LEN],
    plaintext: &[u8],
) -> Result<Token, CipherError> {
    let bad_key = |_: InvalidLength| CipherError::InvalidKeyLength(key.len());
    let ciphertext = match size {
        KeySize::Aes128 => Aes128CbcEnc::new_from_slices(key, &iv)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        KeySize::Aes192 => Aes192CbcEnc::new_from_slices(key, &iv)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        KeySize::Aes256 => Aes256CbcEnc::new_from_slices(key, &iv)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };
    trace!(
        key_bits = size.bits(),
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed text token"
    );
    Ok(Token { iv, ciphertext })
}

/// Decrypt and unpad the ciphertext of `token`.
fn open(size: KeySize, key: &[u8], token: &Token) -> Result<Vec<u8>, CipherError> {
    let ciphertext = token.ciphertext.as_slice();
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CipherError::MisalignedCiphertext(ciphertext.len()));
    }

    let bad_key = |_: InvalidLength| CipherError::InvalidKeyLength(key.len());
    let plaintext = match size {
        KeySize::Aes128 => Aes128CbcDec::new_from_slices(key, &token.iv)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        KeySize::Aes192 => Aes192CbcDec::new_from_slices(key, &token.iv)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        KeySize::Aes256 => Aes256CbcDec::new_from_slices(key, &token.iv)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    }
    .map_err(|_| CipherError::Padding)?;

    trace!(
        key_bits = size.bits(),
        ciphertext_len = ciphertext.len(),
        "opened text token"
    );
    Ok(plaintext)
}
