//! Shared fixtures for token service tests

mod codec_tests;
mod issuer_tests;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainError;
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::clock::ManualClock;
use crate::services::token::{Rs256KeyManager, TokenService, TokenServiceConfig};

pub(super) const PRIVATE_KEY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/jwt_private_key.pem"
));
pub(super) const PUBLIC_KEY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/jwt_public_key.pem"
));
pub(super) const OTHER_PRIVATE_KEY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/other_private_key.pem"
));
pub(super) const OTHER_PUBLIC_KEY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/other_public_key.pem"
));

pub(super) fn key_manager() -> Arc<Rs256KeyManager> {
    Arc::new(Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap())
}

/// Token service over an in-memory store and a frozen clock
pub(super) struct Harness {
    pub service: TokenService<InMemoryRevocationStore>,
    pub store: InMemoryRevocationStore,
    pub clock: ManualClock,
}

pub(super) fn harness() -> Harness {
    let store = InMemoryRevocationStore::new();
    let clock = ManualClock::starting_now();
    let service = TokenService::with_clock(
        store.clone(),
        key_manager(),
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    );

    Harness {
        service,
        store,
        clock,
    }
}

/// Store whose backend is always down
#[derive(Debug, Default)]
pub(super) struct FailingRevocationStore;

#[async_trait]
impl RevocationStore for FailingRevocationStore {
    async fn store(&self, _jti: &str) -> Result<(), DomainError> {
        Err(DomainError::Store {
            message: "connection refused".to_string(),
        })
    }

    async fn is_valid(&self, _jti: &str) -> Result<bool, DomainError> {
        Err(DomainError::Store {
            message: "connection refused".to_string(),
        })
    }

    async fn delete(&self, _jti: &str) -> Result<(), DomainError> {
        Err(DomainError::Store {
            message: "connection refused".to_string(),
        })
    }
}
