//! # Insapp Core
//!
//! Session-token subsystem of the Insapp backend: issuance of a short-lived
//! access token and a long-lived revocable refresh token, the refresh protocol
//! that silently renews expired access tokens, and revocation of sessions.
//!
//! Persistence of refresh-token liveness is delegated to a [`RevocationStore`]
//! implementation supplied by the caller.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
