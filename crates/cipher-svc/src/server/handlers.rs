//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse, TextRequest, TextResponse};
use common::ServiceError;
use text_cipher::{CipherError, TextEncryptor};
use tracing::{debug, error, warn};

use super::state::AppState;

/// `POST /encrypt`: encrypt `text` with the shared encryptor.
///
/// `null` and blank values come back unchanged.
pub async fn encrypt(State(state): State<AppState>, Json(req): Json<TextRequest>) -> Response {
    let Some(text) = req.text else {
        return text_response(None);
    };

    match state.encryptor.encrypt_async(&text).await {
        Ok(token) => {
            debug!(text_len = text.len(), token_len = token.len(), "encrypted");
            text_response(Some(token))
        }
        Err(e) => {
            let err = classify(e, Direction::Encrypt);
            error!(error = %err, "encryption failed");
            error_response(&err)
        }
    }
}

/// `POST /decrypt`: decrypt a token produced by `POST /encrypt`.
///
/// Malformed tokens and tokens from another key are rejected with `400`.
pub async fn decrypt(State(state): State<AppState>, Json(req): Json<TextRequest>) -> Response {
    let Some(token) = req.text else {
        return text_response(None);
    };

    match state.encryptor.decrypt_async(&token).await {
        Ok(text) => {
            debug!(token_len = token.len(), "decrypted");
            text_response(Some(text))
        }
        Err(e) => {
            let err = classify(e, Direction::Decrypt);
            warn!(error = %err, "decryption failed");
            error_response(&err)
        }
    }
}

/// `GET /health`: liveness check.
///
/// The encryptor is exercised once before the listener binds, so a running service is
/// always ready.
pub async fn health() -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Map a cipher failure onto the service error it represents.
///
/// Key problems are server-side configuration failures. Anything else while
/// decrypting is the caller's token being bad.
fn classify(err: CipherError, direction: Direction) -> ServiceError {
    if err.is_key_error() {
        return ServiceError::EncryptionFailure(err.to_string());
    }
    match direction {
        Direction::Decrypt => ServiceError::BadRequest(err.to_string()),
        Direction::Encrypt => ServiceError::Internal(err.to_string()),
    }
}

fn text_response(text: Option<String>) -> Response {
    (StatusCode::OK, Json(TextResponse { text })).into_response()
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match err {
        ServiceError::BadRequest(msg) => msg.clone(),
        // Server-side details stay in the logs.
        ServiceError::EncryptionFailure(_) => "encryption key misconfigured".into(),
        ServiceError::Internal(_) => "internal error".into(),
    };
    (status, Json(ErrorResponse::new(err.code(), message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, routing::post, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    mockall::mock! {
        pub Enc {}

        #[async_trait]
        impl TextEncryptor for Enc {
            fn encrypt(&self, text: &str) -> Result<String, CipherError>;
            fn decrypt(&self, text: &str) -> Result<String, CipherError>;
            async fn encrypt_async(&self, text: &str) -> Result<String, CipherError>;
            async fn decrypt_async(&self, text: &str) -> Result<String, CipherError>;
        }
    }

    fn router_with(enc: MockEnc) -> Router {
        Router::new()
            .route("/encrypt", post(encrypt))
            .route("/decrypt", post(decrypt))
            .with_state(AppState::new(Arc::new(enc)))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn null_text_skips_encryptor() {
        // No expectations set: any call into the mock would panic.
        let app = router_with(MockEnc::new());
        let resp = app
            .oneshot(json_post("/encrypt", r#"{"text":null}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn key_error_maps_to_500() {
        let mut enc = MockEnc::new();
        enc.expect_encrypt_async()
            .returning(|_| Err(CipherError::InvalidKeyLength(5)));
        let resp = router_with(enc)
            .oneshot(json_post("/encrypt", r#"{"text":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn bad_token_maps_to_400() {
        let mut enc = MockEnc::new();
        enc.expect_decrypt_async()
            .returning(|_| Err(CipherError::Padding));
        let resp = router_with(enc)
            .oneshot(json_post("/decrypt", r#"{"text":"AAAA"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn handler_forwards_text_to_encryptor() {
        let mut enc = MockEnc::new();
        enc.expect_encrypt_async()
            .withf(|text: &str| text == "hello")
            .times(1)
            .returning(|_| Ok("TOKEN".into()));
        let resp = router_with(enc)
            .oneshot(json_post("/encrypt", r#"{"text":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn classify_key_error_is_encryption_failure() {
        let err = classify(CipherError::InvalidKeyLength(3), Direction::Decrypt);
        assert!(matches!(err, ServiceError::EncryptionFailure(_)));
    }

    #[test]
    fn classify_decrypt_format_error_is_bad_request() {
        let err = classify(CipherError::TokenTooShort(4), Direction::Decrypt);
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn classify_encrypt_io_error_is_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = classify(CipherError::Io(io), Direction::Encrypt);
        assert!(matches!(err, ServiceError::Internal(_)));
    }
}
