//! Token signing configuration

use serde::{Deserialize, Serialize};

/// Default location of the RSA private key used to sign tokens
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "keys/jwt_private_key.pem";

/// Default location of the RSA public key used to verify tokens
pub const DEFAULT_PUBLIC_KEY_PATH: &str = "keys/jwt_public_key.pem";

/// JWT configuration
///
/// Tokens are always signed with RS256, so there is no secret or algorithm
/// to configure, only the key pair and the two lifetimes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Path to the PEM-encoded RSA private key
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key
    pub public_key_path: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from(DEFAULT_PRIVATE_KEY_PATH),
            public_key_path: String::from(DEFAULT_PUBLIC_KEY_PATH),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 259_200, // 72 hours
        }
    }
}

impl JwtConfig {
    /// Create a configuration pointing at the given key files
    pub fn new(private_key_path: impl Into<String>, public_key_path: impl Into<String>) -> Self {
        Self {
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.private_key_path),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.public_key_path),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in hours
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry = hours * 3600;
        self
    }
}
