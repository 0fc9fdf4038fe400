//! Main token service implementation

use std::sync::Arc;

use crate::domain::entities::token::{Claims, SessionRenewal, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;
use crate::services::clock::{Clock, SystemClock};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::key_manager::Rs256KeyManager;
use super::refresh::RefreshProtocol;
use super::revocation::RevocationController;

/// Service for issuing, renewing and revoking session tokens
///
/// Wires one codec, one issuer, the refresh protocol and the revocation
/// controller around a shared key manager and revocation store.
pub struct TokenService<S: RevocationStore> {
    codec: TokenCodec,
    issuer: TokenIssuer<S>,
    refresh: RefreshProtocol<S>,
    revocation: RevocationController<S>,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service running on the wall clock
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store tracking live refresh tokens
    /// * `key_manager` - Loaded RS256 key pair
    /// * `config` - Token lifetimes
    pub fn new(store: S, key_manager: Arc<Rs256KeyManager>, config: TokenServiceConfig) -> Self {
        Self::with_clock(store, key_manager, config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit time source
    pub fn with_clock(
        store: S,
        key_manager: Arc<Rs256KeyManager>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = Arc::new(store);
        let codec = TokenCodec::new(key_manager, clock);
        let issuer = TokenIssuer::new(codec.clone(), Arc::clone(&store), config);
        let refresh = RefreshProtocol::new(issuer.clone(), Arc::clone(&store));
        let revocation = RevocationController::new(codec.clone(), store);

        Self {
            codec,
            issuer,
            refresh,
            revocation,
        }
    }

    /// Issues a new access/refresh pair for an authenticated user
    pub async fn issue_pair(&self, username: &str, role: &str) -> Result<TokenPair, DomainError> {
        self.issuer.issue_pair(username, role).await
    }

    /// Runs the refresh protocol on the pair presented with a protected call
    pub async fn check_and_refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<SessionRenewal, DomainError> {
        self.refresh.check_and_refresh(access_token, refresh_token).await
    }

    /// Revokes the session behind a refresh token
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        self.revocation.revoke(refresh_token).await
    }

    /// Decodes a live token
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.codec.decode(token)
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}
