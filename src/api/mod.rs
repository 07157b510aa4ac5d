//! API boundary: error taxonomy, request/response DTOs and payload
//! validation.
//!
//! Types here are what an HTTP (or other transport) adapter serializes; they
//! are deliberately flat, serde-friendly and free of repository concerns.

pub mod error;
pub mod types;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use types::*;
