//! Revocation store backend configuration

use serde::{Deserialize, Serialize};

/// Redis configuration for the refresh-token revocation store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL; `None` selects the in-process store
    #[serde(default)]
    pub url: Option<String>,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Key prefix applied to every revocation entry
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Optional lifetime of a revocation entry in seconds.
    ///
    /// When set, it bounds the total lifetime of a session regardless of how
    /// often its refresh token is extended.
    #[serde(default)]
    pub revocation_ttl: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            connection_timeout: 5,
            key_prefix: None,
            revocation_ttl: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").ok().filter(|v| !v.is_empty()),
            revocation_ttl: std::env::var("REVOCATION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok()),
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the lifetime of revocation entries
    pub fn with_revocation_ttl(mut self, seconds: u64) -> Self {
        self.revocation_ttl = Some(seconds);
        self
    }

    /// Checks values that would make every revocation write fail
    ///
    /// Redis refuses `SETEX` with a zero expiry, so a zero TTL is an error
    /// rather than a silently broken login.
    pub fn validate(&self) -> Result<(), String> {
        if self.revocation_ttl == Some(0) {
            return Err(String::from(
                "REVOCATION_TTL_SECONDS must be greater than zero; leave it unset for no TTL",
            ));
        }
        if self.connection_timeout == 0 {
            return Err(String::from("Redis connection timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert!(config.url.is_none());
        assert!(config.revocation_ttl.is_none());
        assert_eq!(config.connection_timeout, 5);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379").with_prefix("insapp");

        assert_eq!(config.url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.make_key("revocation:refresh:abc"), "insapp:revocation:refresh:abc");
    }

    #[test]
    fn test_zero_revocation_ttl_is_invalid() {
        let config = CacheConfig::default().with_revocation_ttl(0);
        assert!(config.validate().is_err());

        assert!(CacheConfig::default().with_revocation_ttl(3600).validate().is_ok());
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("revocation:refresh:abc"), "revocation:refresh:abc");
    }
}
