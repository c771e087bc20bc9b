//! Common types, protocol definitions, and errors shared across `text-cipher` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
