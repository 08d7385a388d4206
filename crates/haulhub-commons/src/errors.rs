//! Shared error types for HaulHub.
//!
//! Every fallible operation in the workspace funnels into [`CommonError`].
//! The variants are failure *kinds*, not HTTP status codes; the API layer
//! owns the mapping to the wire.

use thiserror::Error;

/// Common error type for HaulHub operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    /// Missing or malformed input (required fields, bad service name,
    /// invalid price, out-of-window start time).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Referenced job/booking/driver does not exist — or exists but is not
    /// owned by the requester. The two are conflated on purpose so that
    /// lookups never leak existence of other users' resources.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested transition is not legal from the current status.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Duplicate bid, overlapping booking slot, or a lost optimistic write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credential.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credential, wrong actor for this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure (persistence, serialization).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommonError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The human-readable message, without the kind prefix. Error responses
    /// carry this next to [`CommonError::kind`].
    pub fn message(&self) -> &str {
        match self {
            CommonError::Validation(msg)
            | CommonError::NotFound(msg)
            | CommonError::InvalidState(msg)
            | CommonError::Conflict(msg)
            | CommonError::Unauthorized(msg)
            | CommonError::Forbidden(msg)
            | CommonError::Internal(msg) => msg,
        }
    }

    /// Stable machine-readable code for error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            CommonError::Validation(_) => "VALIDATION_ERROR",
            CommonError::NotFound(_) => "NOT_FOUND",
            CommonError::InvalidState(_) => "INVALID_STATE",
            CommonError::Conflict(_) => "CONFLICT",
            CommonError::Unauthorized(_) => "UNAUTHORIZED",
            CommonError::Forbidden(_) => "FORBIDDEN",
            CommonError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, CommonError>;
