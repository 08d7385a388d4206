//! Authentication errors.

use haulhub_commons::CommonError;
use thiserror::Error;

/// Why a bearer credential was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No Authorization header on the request.
    #[error("Access denied: no token provided")]
    MissingToken,

    /// Header present but not "Bearer <token>".
    #[error("Access denied: invalid token format (expected 'Bearer <token>')")]
    InvalidFormat,

    /// Signature verification failed or the token is malformed.
    #[error("Invalid token: {0}")]
    InvalidSignature(String),

    /// Token expired.
    #[error("Token has expired")]
    Expired,

    /// Token verified but a required claim is missing or empty.
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Token verified but the role claim names no known actor variant.
    #[error("Unknown actor role: {0}")]
    UnknownRole(String),

    /// Token algorithm is not supported.
    #[error("Unsupported token algorithm")]
    UnsupportedAlgorithm,

    /// Key material problem while signing (test/dev paths).
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

impl From<AuthError> for CommonError {
    fn from(err: AuthError) -> Self {
        match err {
            // A syntactically valid credential with a role this service
            // does not recognize is a forbidden actor, not a bad token.
            AuthError::UnknownRole(_) => CommonError::forbidden(err.to_string()),
            AuthError::SigningFailed(_) => CommonError::internal(err.to_string()),
            _ => CommonError::unauthorized(err.to_string()),
        }
    }
}
