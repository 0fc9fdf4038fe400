//! Explicit revocation of refresh tokens (logout)

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::codec::TokenCodec;

/// Deletes refresh-token identifiers from the store on request
pub struct RevocationController<S: RevocationStore> {
    codec: TokenCodec,
    store: Arc<S>,
}

impl<S: RevocationStore> RevocationController<S> {
    pub fn new(codec: TokenCodec, store: Arc<S>) -> Self {
        Self { codec, store }
    }

    /// Revokes the session behind a refresh token
    ///
    /// Expired tokens are accepted so that dead sessions can still be cleaned
    /// up. Revoking an identifier that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// * `DomainError::Token(TokenError::Malformed)` - The string is not a
    ///   refresh token signed by our key
    /// * `DomainError::Store` - The store could not be reached
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        let claims = self.codec.decode_ignoring_expiry(refresh_token)?;

        let jti = claims.jti.ok_or_else(|| {
            debug!("Revocation attempted with a token that carries no jti");
            TokenError::Malformed
        })?;

        self.store.delete(&jti).await?;
        info!(jti = %jti, username = %claims.username, "Refresh token revoked");

        Ok(())
    }
}
