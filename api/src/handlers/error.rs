//! Mapping of domain failures onto HTTP responses
//!
//! Every failure leaves the server as the shared `ErrorResponse` envelope.
//! Authentication outcomes are returned to the client, never swallowed.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use insapp_core::errors::{DomainError, TokenError};
use tracing::{debug, error};

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Errors produced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Bearer access token or refresh token header missing
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("Invalid request: {0}")]
    Validation(String),
}

impl ApiError {
    /// Machine-readable code carried in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(DomainError::Token(TokenError::Malformed)) => "invalid_token",
            ApiError::Domain(DomainError::Token(TokenError::Expired)) => "token_expired",
            ApiError::Domain(DomainError::Unauthorized) => "unauthorized",
            ApiError::Domain(DomainError::Store { .. }) => "store_unavailable",
            ApiError::Domain(DomainError::Key(_))
            | ApiError::Domain(DomainError::Config(_))
            | ApiError::Domain(DomainError::Internal { .. }) => "internal_error",
            ApiError::MissingCredentials(_) => "missing_credentials",
            ApiError::Validation(_) => "validation_error",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Token(TokenError::Malformed)) => {
                "Invalid token. Please log in again".to_string()
            }
            ApiError::Domain(DomainError::Token(TokenError::Expired)) => {
                "Token has expired. Please log in again".to_string()
            }
            ApiError::Domain(DomainError::Unauthorized) => {
                "Session is no longer valid. Please log in again".to_string()
            }
            ApiError::Domain(DomainError::Store { .. }) => {
                "Session store is temporarily unavailable. Please try again later".to_string()
            }
            ApiError::Domain(_) => "An internal error occurred".to_string(),
            ApiError::MissingCredentials(what) => format!("Missing {}", what),
            ApiError::Validation(message) => message.clone(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) if err.requires_login() => StatusCode::UNAUTHORIZED,
            ApiError::MissingCredentials(_) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::Store { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }

        ErrorResponse::new(self.code(), self.message()).to_response(status)
    }
}
