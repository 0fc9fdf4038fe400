//! Revocation store trait defining the liveness contract for refresh tokens.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainError;

/// Store tracking which refresh-token identifiers (JTIs) are still live
///
/// The store is the single source of truth for refresh-token validity: a JTI
/// absent from the store is revoked, whatever the expiration embedded in the
/// token says. Implementations must make each operation atomic on their own;
/// callers add no locking.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Register a new identifier as live
    ///
    /// # Arguments
    /// * `jti` - Freshly allocated refresh-token identifier
    ///
    /// # Returns
    /// * `Ok(())` - Identifier registered
    /// * `Err(DomainError::Store)` - Backend failure
    async fn store(&self, jti: &str) -> Result<(), DomainError>;

    /// Check whether an identifier is currently registered
    ///
    /// # Returns
    /// * `Ok(true)` - Identifier is live
    /// * `Ok(false)` - Identifier was never stored or has been deleted
    /// * `Err(DomainError::Store)` - Backend failure
    async fn is_valid(&self, jti: &str) -> Result<bool, DomainError>;

    /// Remove an identifier
    ///
    /// Deleting an identifier that is not present succeeds.
    async fn delete(&self, jti: &str) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn store(&self, jti: &str) -> Result<(), DomainError> {
        (**self).store(jti).await
    }

    async fn is_valid(&self, jti: &str) -> Result<bool, DomainError> {
        (**self).is_valid(jti).await
    }

    async fn delete(&self, jti: &str) -> Result<(), DomainError> {
        (**self).delete(jti).await
    }
}
