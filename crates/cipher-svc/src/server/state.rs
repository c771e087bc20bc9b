//! Shared application state injected into every Axum handler.

use text_cipher::SharedEncryptor;

/// Application state shared across all request handlers.
///
/// Cloning copies one `Arc`; every request sees the same encryptor and key.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide encryptor built by [`text_cipher::register`].
    pub encryptor: SharedEncryptor,
}

impl AppState {
    /// Create a new [`AppState`] around an already registered encryptor.
    pub fn new(encryptor: SharedEncryptor) -> Self {
        Self { encryptor }
    }
}
