//! Binding one configured encryptor into a host application.
//!
//! The host builds a single [`SharedEncryptor`] at startup and clones the
//! `Arc` into whatever state its handlers share. Every clone points at the same
//! instance and the same key for the life of the process.

use std::sync::Arc;

use tracing::debug;

use crate::encryptor::{Encryptor, TextEncryptor};

/// The encryption capability as handed to consumers.
pub type SharedEncryptor = Arc<dyn TextEncryptor>;

/// Build the process-wide encryptor for `key`.
///
/// Like [`Encryptor::new`], this does not validate the key length.
pub fn register(key: impl AsRef<str>) -> SharedEncryptor {
    let encryptor = Encryptor::new(key);
    debug!(key_len = encryptor.key_len(), "encryptor registered");
    Arc::new(encryptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_instance() {
        let shared = register("0123456789abcdef");
        let other = Arc::clone(&shared);
        assert!(Arc::ptr_eq(&shared, &other));
        let token = shared.encrypt("shared").unwrap();
        assert_eq!(other.decrypt(&token).unwrap(), "shared");
    }

    #[test]
    fn registered_instance_matches_free_functions() {
        let shared = register("0123456789abcdef01234567");
        let token = crate::cipher::encrypt("free form", "0123456789abcdef01234567").unwrap();
        assert_eq!(shared.decrypt(&token).unwrap(), "free form");
    }
}
