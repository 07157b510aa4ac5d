//! Error taxonomy exposed to callers.
//!
//! Every operation returns a stable machine-checkable kind plus a
//! human-readable message; internal detail (store errors, stack context)
//! never leaks past [`ApiError::Internal`].

use serde::Serialize;

use crate::db::repository::RepositoryError;

/// Result type for all boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error taxonomy for the operation surface.
///
/// Validation errors are detected and reported before any mutation; no
/// partial writes precede a reported validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing required fields, or an unrecognized enum value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Missing, invalid or expired token, or wrong credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Valid token but insufficient role for the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced account, reward or pickup does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unique-constraint violation, e.g. duplicate phone number.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The reward id already appears in the account's redeemed set.
    #[error("reward already redeemed")]
    AlreadyRedeemed,

    /// The account's balance does not cover the reward's cost.
    #[error("insufficient points: {required} required, {available} available")]
    InsufficientPoints { required: u64, available: u64 },

    /// Unexpected store or infrastructure failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-checkable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::AlreadyRedeemed => "already_redeemed",
            ApiError::InsufficientPoints { .. } => "insufficient_points",
            ApiError::Internal(_) => "internal",
        }
    }

    /// Wire shape for transport adapters.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Serialized error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
            RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            // Connection, query, configuration and internal failures are all
            // infrastructure from the caller's point of view.
            other => ApiError::Internal(other.to_string()),
        }
    }
}
