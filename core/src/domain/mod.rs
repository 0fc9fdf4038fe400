//! Domain layer containing the session-token entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    Claims, SessionRenewal, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_HOURS,
};
