use serde::{Deserialize, Serialize};
use validator::Validate;

use insapp_core::domain::entities::token::SessionRenewal;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    /// Access token currently held by the client, expired or not
    #[validate(length(min = 1))]
    pub access_token: String,

    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Whether a new access token was minted
    pub renewed: bool,
}

impl From<SessionRenewal> for RefreshTokenResponse {
    fn from(renewal: SessionRenewal) -> Self {
        Self {
            access_token: renewal.access_token,
            refresh_token: renewal.refresh_token,
            renewed: renewal.renewed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub username: String,
    pub role: String,
    /// Whether this request minted a new access token
    pub renewed: bool,
}
