//! Token entities for JWT-based sessions.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (72 hours)
pub const REFRESH_TOKEN_EXPIRY_HOURS: i64 = 72;

/// Claims structure for JWT payload
///
/// The same shape is used for both token kinds. Only refresh tokens carry a
/// `jti`, which is the key under which the session is tracked by the
/// revocation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Name of the authenticated principal
    pub username: String,

    /// Authorization tag, carried but never interpreted here
    pub role: String,

    /// JWT ID (refresh tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an access token expiring at `expires_at`
    pub fn access(
        username: impl Into<String>,
        role: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            jti: None,
            exp: expires_at.timestamp(),
        }
    }

    /// Creates claims for a refresh token identified by `jti`
    pub fn refresh(
        username: impl Into<String>,
        role: impl Into<String>,
        jti: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            jti: Some(jti.into()),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the same claims with a new expiration instant
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.exp = expires_at.timestamp();
        self
    }

    /// Whether these claims belong to a refresh token
    pub fn is_refresh(&self) -> bool {
        self.jti.is_some()
    }

    /// Checks if the claims have expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiration as a date, if the timestamp is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Token pair handed to the client at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

/// Outcome of a successful pass through the refresh protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRenewal {
    /// Access token the client should use from now on
    pub access_token: String,

    /// Refresh token with its expiration pushed forward
    pub refresh_token: String,

    /// Identity carried by the access token
    pub claims: Claims,

    /// Whether a new access token was minted
    pub renewed: bool,
}
