//! Redis implementation of the refresh-token revocation store
//!
//! A live refresh token is a key `{prefix}:revocation:refresh:{jti}`; deleting
//! the key revokes the token. Entries carry no TTL unless
//! `REVOCATION_TTL_SECONDS` is configured, in which case the session dies that
//! many seconds after login however often its refresh token was extended.

use async_trait::async_trait;
use tracing::debug;

use insapp_core::errors::DomainError;
use insapp_core::repositories::RevocationStore;

use super::redis_client::RedisClient;
use super::CacheConfig;

/// Key namespace for live refresh-token identifiers
const REVOCATION_KEY_NAMESPACE: &str = "revocation:refresh";

/// Value stored under each live key; only presence matters
const LIVE_MARKER: &str = "1";

/// Revocation store backed by Redis
#[derive(Debug, Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Redis key under which `jti` is tracked
    pub fn key_for(&self, jti: &str) -> String {
        revocation_key(self.client.config(), jti)
    }
}

/// Builds the Redis key for a refresh-token identifier
pub(crate) fn revocation_key(config: &CacheConfig, jti: &str) -> String {
    config.make_key(&format!("{}:{}", REVOCATION_KEY_NAMESPACE, jti))
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn store(&self, jti: &str) -> Result<(), DomainError> {
        let key = self.key_for(jti);

        match self.client.config().revocation_ttl {
            Some(ttl) => self.client.set_with_expiry(&key, LIVE_MARKER, ttl).await?,
            None => self.client.set(&key, LIVE_MARKER).await?,
        }

        debug!(jti = %jti, "Refresh token registered as live");
        Ok(())
    }

    async fn is_valid(&self, jti: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(jti)).await?)
    }

    async fn delete(&self, jti: &str) -> Result<(), DomainError> {
        let existed = self.client.delete(&self.key_for(jti)).await?;
        if !existed {
            debug!(jti = %jti, "Refresh token was already absent");
        }
        Ok(())
    }
}
