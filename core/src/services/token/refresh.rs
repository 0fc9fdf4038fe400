//! Refresh protocol: keep, silently renew, or reject a session

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::token::SessionRenewal;
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::codec::TokenVerdict;
use super::issuer::TokenIssuer;

/// State machine run on every protected call
pub struct RefreshProtocol<S: RevocationStore> {
    issuer: TokenIssuer<S>,
    store: Arc<S>,
}

impl<S: RevocationStore> RefreshProtocol<S> {
    pub fn new(issuer: TokenIssuer<S>, store: Arc<S>) -> Self {
        Self { issuer, store }
    }

    /// Checks the presented pair and renews what needs renewing
    ///
    /// # Arguments
    ///
    /// * `access_token` - Access token presented by the client
    /// * `refresh_token` - Refresh token presented by the client
    ///
    /// # Returns
    ///
    /// * `Ok(SessionRenewal)` with `renewed == false` - The access token is
    ///   still valid and is returned unchanged; the refresh token is re-signed
    ///   with a later expiry without consulting the store, even if its own
    ///   `exp` had already passed
    /// * `Ok(SessionRenewal)` with `renewed == true` - The access token had
    ///   expired, the refresh token is live, and a new access token was minted
    /// * `Err(DomainError::Token(TokenError::Malformed))` - The access token is
    ///   not one of ours
    /// * `Err(DomainError::Unauthorized)` - The refresh token is unusable,
    ///   revoked, or expired; in the expired case its `jti` is deleted
    pub async fn check_and_refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<SessionRenewal, DomainError> {
        let codec = self.issuer.codec();

        let access_claims = match codec.inspect(access_token) {
            TokenVerdict::Valid(claims) if !claims.is_refresh() => {
                let refresh_token = self.extend(refresh_token)?;
                return Ok(SessionRenewal {
                    access_token: access_token.to_string(),
                    refresh_token,
                    claims,
                    renewed: false,
                });
            }
            TokenVerdict::Expired(claims) if !claims.is_refresh() => claims,
            _ => return Err(TokenError::Malformed.into()),
        };

        let (refresh_claims, refresh_expired) = match codec.inspect(refresh_token) {
            TokenVerdict::Valid(claims) => (claims, false),
            TokenVerdict::Expired(claims) => (claims, true),
            TokenVerdict::Malformed => {
                debug!("Refresh token could not be verified");
                return Err(DomainError::Unauthorized);
            }
        };

        let jti = refresh_claims
            .jti
            .clone()
            .ok_or(DomainError::Unauthorized)?;

        if !self.store.is_valid(&jti).await? {
            info!(jti = %jti, "Refresh token has been revoked");
            return Err(DomainError::Unauthorized);
        }

        if refresh_expired {
            info!(jti = %jti, "Refresh token expired, revoking session");
            self.store.delete(&jti).await?;
            return Err(DomainError::Unauthorized);
        }

        let (new_access_token, claims) = self
            .issuer
            .mint_access(&access_claims.username, &access_claims.role)?;
        let new_refresh_token = self.issuer.extend_refresh_token(refresh_claims)?;

        debug!(jti = %jti, username = %claims.username, "Renewed access token");

        Ok(SessionRenewal {
            access_token: new_access_token,
            refresh_token: new_refresh_token,
            claims,
            renewed: true,
        })
    }

    /// Re-signs a refresh token with a later expiry, expired or not
    fn extend(&self, refresh_token: &str) -> Result<String, DomainError> {
        match self.issuer.codec().decode_ignoring_expiry(refresh_token) {
            Ok(claims) if claims.is_refresh() => self.issuer.extend_refresh_token(claims),
            _ => {
                debug!("Refresh token presented with a valid access token is unusable");
                Err(DomainError::Unauthorized)
            }
        }
    }
}
