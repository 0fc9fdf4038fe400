//! Token service module for session management
//!
//! This module handles all token-related operations including:
//! - RS256 key management for asymmetric signing
//! - Encoding and verification of signed claim sets
//! - Issuance of access/refresh token pairs
//! - The refresh protocol that silently renews expired access tokens
//! - Revocation of refresh tokens on logout

mod codec;
mod config;
mod issuer;
mod key_manager;
mod refresh;
mod revocation;
mod service;

#[cfg(test)]
mod tests;

pub use codec::{TokenCodec, TokenVerdict};
pub use config::{TokenServiceConfig, MAX_TOKEN_LIFETIME_SECONDS};
pub use issuer::TokenIssuer;
pub use key_manager::Rs256KeyManager;
pub use refresh::RefreshProtocol;
pub use revocation::RevocationController;
pub use service::TokenService;
