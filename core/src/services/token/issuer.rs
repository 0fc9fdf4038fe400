//! Issuance of access/refresh token pairs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::DomainError;
use crate::repositories::RevocationStore;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Mints tokens and registers refresh-token identifiers with the store
pub struct TokenIssuer<S: RevocationStore> {
    codec: TokenCodec,
    store: Arc<S>,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> Clone for TokenIssuer<S> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: RevocationStore> TokenIssuer<S> {
    pub fn new(codec: TokenCodec, store: Arc<S>, config: TokenServiceConfig) -> Self {
        Self {
            codec,
            store,
            config,
        }
    }

    /// Creates a fresh token pair for an authenticated principal
    ///
    /// # Arguments
    ///
    /// * `username` - Identity established by the login collaborator
    /// * `role` - Authorization tag carried through both tokens
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access token valid for the access lifetime and a
    ///   refresh token whose new `jti` is already live in the store
    /// * `Err(DomainError)` - Signing or store failure
    ///
    /// Earlier sessions of the same user are left untouched.
    pub async fn issue_pair(&self, username: &str, role: &str) -> Result<TokenPair, DomainError> {
        let now = self.codec.now();
        let access_expires_at = expiry_after(now, self.config.access_token_ttl)?;
        let refresh_expires_at = expiry_after(now, self.config.refresh_token_ttl)?;

        let access_token = self
            .codec
            .encode(&Claims::access(username, role, access_expires_at))?;

        let jti = Uuid::new_v4().to_string();
        self.store.store(&jti).await?;

        let refresh_claims = Claims::refresh(username, role, jti.as_str(), refresh_expires_at);
        let refresh_token = self.codec.encode(&refresh_claims)?;

        debug!(jti = %jti, username, "Issued session token pair");

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Mints an access token expiring one access lifetime from now
    ///
    /// Returns the token together with the claims it carries.
    pub fn mint_access(&self, username: &str, role: &str) -> Result<(String, Claims), DomainError> {
        let expires_at = expiry_after(self.codec.now(), self.config.access_token_ttl)?;
        let claims = Claims::access(username, role, expires_at);
        let token = self.codec.encode(&claims)?;
        Ok((token, claims))
    }

    /// Re-signs refresh claims with expiry pushed to one refresh lifetime from now
    ///
    /// The `jti` is kept and the store is not touched.
    pub fn extend_refresh_token(&self, claims: Claims) -> Result<String, DomainError> {
        let expires_at = expiry_after(self.codec.now(), self.config.refresh_token_ttl)?;
        self.codec.encode(&claims.with_expiry(expires_at))
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

/// `now + ttl`, or an internal error when the instant is not representable
fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, DomainError> {
    now.checked_add_signed(ttl).ok_or_else(|| {
        error!(ttl_seconds = ttl.num_seconds(), "Token expiry overflows the calendar");
        DomainError::Internal {
            message: format!("Token lifetime of {}s overflows", ttl.num_seconds()),
        }
    })
}
