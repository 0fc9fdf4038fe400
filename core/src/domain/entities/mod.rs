//! Domain entities representing core business objects.

pub mod token;

// Re-export commonly used types
pub use token::{
    Claims, SessionRenewal, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_HOURS,
};
