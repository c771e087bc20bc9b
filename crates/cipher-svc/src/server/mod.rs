//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject the shared encryptor (`AppState`) into handlers.

pub mod handlers;
pub mod router;
pub mod state;
