//! Request and response types for the text-cipher HTTP API.
//!
//! All bodies are JSON. `text` is nullable on both sides: `null` in gives
//! `null` out, like blank strings.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encrypt / decrypt endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt` and `POST /decrypt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRequest {
    /// Plaintext to encrypt, or token to decrypt.
    #[serde(default)]
    pub text: Option<String>,
}

/// Successful response body for `POST /encrypt` and `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResponse {
    /// Token (after encrypt) or plaintext (after decrypt).
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, always `"ok"` once serving.
    pub status: String,
    /// Service version.
    pub version: String,
}
