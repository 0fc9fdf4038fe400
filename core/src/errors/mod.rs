//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{ConfigError, KeyError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Signing keys could not be loaded; fatal at startup
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Token lifetimes out of range; fatal at startup
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token string rejected by the codec
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The session cannot be renewed and the client must log in again
    #[error("Unauthorized")]
    Unauthorized,

    /// The revocation store failed to answer
    #[error("Revocation store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Whether the caller should answer "re-authenticate"
    pub fn requires_login(&self) -> bool {
        matches!(self, DomainError::Token(_) | DomainError::Unauthorized)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
