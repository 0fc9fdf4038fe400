//! Error types for key loading and token validation

use std::path::PathBuf;
use thiserror::Error;

/// Signing key loading errors
///
/// Any of these aborts startup: no token can be signed or verified without
/// a valid key pair.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Failed to read key file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid RSA private key in {}: {source}", path.display())]
    InvalidPrivateKey {
        path: PathBuf,
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    #[error("Invalid RSA public key in {}: {source}", path.display())]
    InvalidPublicKey {
        path: PathBuf,
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    #[error("Private and public keys do not form a pair")]
    Mismatch,
}

/// Token validation errors
///
/// `Malformed` is never recovered. `Expired` is recoverable through the
/// refresh protocol for access tokens.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token expired")]
    Expired,
}

/// Invalid token service configuration
///
/// Raised while building the service, so a bad value stops startup instead
/// of failing every request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {seconds}")]
    NonPositiveLifetime { name: &'static str, seconds: i64 },

    #[error("{name} of {seconds}s exceeds the maximum of {max}s")]
    LifetimeTooLong {
        name: &'static str,
        seconds: i64,
        max: i64,
    },
}
