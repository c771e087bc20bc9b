//! Symmetric text encryption into self-contained string tokens.
//!
//! A token is `base64(iv) + base64(ciphertext)`: a fresh random 16-byte IV
//! followed by the AES-CBC/PKCS7 ciphertext of the UTF-8 text, with no
//! separator. The key is the raw UTF-8 bytes of a key string (16, 24 or 32
//! bytes). Blank text passes through unchanged.
//!
//! Tokens carry no MAC and are **not** tamper-evident. The format is kept
//! as-is so existing tokens stay readable.
//!
//! Entry points:
//! - free functions keyed per call: [`encrypt`], [`decrypt`],
//!   [`encrypt_async`], [`decrypt_async`];
//! - an [`Encryptor`] instance holding one key, used through [`TextEncryptor`];
//! - [`register`], which builds the shared instance a host application hands
//!   to its consumers.

pub mod cipher;
pub mod encryptor;
pub mod error;
pub mod key;
pub mod registration;
pub mod token;

pub use cipher::{
    decrypt, decrypt_async, decrypt_opt, encrypt, encrypt_async, encrypt_opt, is_blank, KeySize,
};
pub use encryptor::{Encryptor, TextEncryptor};
pub use error::CipherError;
pub use key::CipherKey;
pub use registration::{register, SharedEncryptor};
pub use token::{Token, IV_B64_LEN, IV_LEN};
