//! Domain error to HTTP response mapping.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use haulhub_auth::AuthError;
use haulhub_commons::CommonError;
use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Wrapper that teaches actix how to render a [`CommonError`].
#[derive(Debug)]
pub struct ApiError {
    error: CommonError,
    status: Option<StatusCode>,
}

impl ApiError {
    /// Renders `err` with `status` instead of the kind's default code. Used
    /// where one operation's wire contract differs from the kind's usual
    /// mapping, e.g. a repeat bid answers 400 while keeping its conflict body.
    pub fn with_status(err: CommonError, status: StatusCode) -> Self {
        Self {
            error: err,
            status: Some(status),
        }
    }

    pub fn inner(&self) -> &CommonError {
        &self.error
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        Self {
            error: err,
            status: None,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::from(CommonError::from(err))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if let Some(status) = self.status {
            return status;
        }
        match self.error {
            // Invalid-state transitions answer 400 like malformed input;
            // 409 is reserved for booking slot conflicts.
            CommonError::Validation(_) | CommonError::InvalidState(_) => StatusCode::BAD_REQUEST,
            CommonError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CommonError::Forbidden(_) => StatusCode::FORBIDDEN,
            CommonError::NotFound(_) => StatusCode::NOT_FOUND,
            CommonError::Conflict(_) => StatusCode::CONFLICT,
            CommonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("request failed: {}", self.error);
        } else {
            log::debug!("request rejected: {}", self.error);
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.error.kind(),
            message: self.error.message().to_string(),
        })
    }
}
