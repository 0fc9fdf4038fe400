//! # Infrastructure Layer
//!
//! Concrete backends for the ports declared in `insapp_core`. Today that is
//! the Redis-backed [`RevocationStore`](insapp_core::RevocationStore) which
//! tracks live refresh-token identifiers across server instances.
//!
//! [`build_revocation_store`] picks the backend from configuration: Redis
//! when `REDIS_URL` is set, the in-process store otherwise.

use std::sync::Arc;

use insapp_core::errors::DomainError;
use insapp_core::repositories::{InMemoryRevocationStore, RevocationStore};
use insapp_shared::config::CacheConfig;

/// Cache module - Redis client and the revocation store built on it
pub mod cache;

pub use cache::{RedisClient, RedisRevocationStore};

/// Builds the revocation store described by `config`
///
/// # Returns
/// * `Ok(store)` - Redis store when a URL is configured, in-memory store otherwise
/// * `Err(InfrastructureError)` - The configuration is invalid or Redis is unreachable
pub async fn build_revocation_store(
    config: &CacheConfig,
) -> Result<Arc<dyn RevocationStore>, InfrastructureError> {
    config.validate().map_err(InfrastructureError::Config)?;

    if config.url.is_none() {
        tracing::warn!(
            "REDIS_URL not set, using in-process revocation store; sessions will not survive a restart"
        );
        return Ok(Arc::new(InMemoryRevocationStore::new()));
    }

    let client = RedisClient::new(config.clone()).await?;
    Ok(Arc::new(RedisRevocationStore::new(client)))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Store {
            message: err.to_string(),
        }
    }
}
