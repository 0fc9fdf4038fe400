//! Cache module for Redis-based storage
//!
//! Provides a Redis client with connection retry logic and the revocation
//! store that keeps refresh-token identifiers in Redis.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use insapp_shared::config::CacheConfig;
