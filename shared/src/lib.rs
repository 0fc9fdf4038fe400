//! Shared configuration and common types for the Insapp server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error envelope returned by the HTTP layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use types::{ErrorResponse, HealthResponse};
