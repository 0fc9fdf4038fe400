//! In-process implementation of RevocationStore

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationStore;

/// Revocation store kept in process memory
///
/// Clones share the same set of live identifiers. Suitable for tests and for
/// single-instance deployments that accept losing every session on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationStore {
    live: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers currently live
    pub async fn live_count(&self) -> usize {
        self.live.read().await.len()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn store(&self, jti: &str) -> Result<(), DomainError> {
        self.live.write().await.insert(jti.to_string());
        Ok(())
    }

    async fn is_valid(&self, jti: &str) -> Result<bool, DomainError> {
        Ok(self.live.read().await.contains(jti))
    }

    async fn delete(&self, jti: &str) -> Result<(), DomainError> {
        self.live.write().await.remove(jti);
        Ok(())
    }
}
