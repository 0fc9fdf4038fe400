//! Tests for token pair issuance

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;

use crate::errors::DomainError;
use crate::repositories::RevocationStore;
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::{harness, key_manager, FailingRevocationStore};

#[tokio::test]
async fn test_issue_pair_lifetimes_and_claims() {
    let h = harness();
    let now = h.clock.now();

    let pair = h.service.issue_pair("alice", "admin").await.unwrap();

    let access = h.service.decode(&pair.access_token).unwrap();
    assert_eq!(access.username, "alice");
    assert_eq!(access.role, "admin");
    assert!(access.jti.is_none());
    assert_eq!(access.exp, (now + Duration::minutes(15)).timestamp());

    let refresh = h.service.decode(&pair.refresh_token).unwrap();
    assert_eq!(refresh.username, "alice");
    assert_eq!(refresh.role, "admin");
    assert_eq!(refresh.exp, (now + Duration::hours(72)).timestamp());

    let jti = refresh.jti.expect("refresh token carries a jti");
    assert!(h.store.is_valid(&jti).await.unwrap());
}

#[tokio::test]
async fn test_each_pair_gets_a_unique_jti() {
    let h = harness();
    let mut seen = HashSet::new();

    for _ in 0..20 {
        let pair = h.service.issue_pair("alice", "admin").await.unwrap();
        let jti = h.service.decode(&pair.refresh_token).unwrap().jti.unwrap();
        assert!(seen.insert(jti));
    }

    assert_eq!(h.store.live_count().await, 20);
}

#[tokio::test]
async fn test_relogin_keeps_earlier_sessions_live() {
    let h = harness();

    let first = h.service.issue_pair("alice", "admin").await.unwrap();
    let second = h.service.issue_pair("alice", "admin").await.unwrap();

    let first_jti = h.service.decode(&first.refresh_token).unwrap().jti.unwrap();
    let second_jti = h.service.decode(&second.refresh_token).unwrap().jti.unwrap();

    assert!(h.store.is_valid(&first_jti).await.unwrap());
    assert!(h.store.is_valid(&second_jti).await.unwrap());
}

#[tokio::test]
async fn test_configured_lifetimes_are_applied() {
    let clock = ManualClock::starting_now();
    let config = TokenServiceConfig {
        access_token_ttl: Duration::minutes(5),
        refresh_token_ttl: Duration::hours(1),
    };
    let service = TokenService::with_clock(
        crate::repositories::InMemoryRevocationStore::new(),
        key_manager(),
        config,
        Arc::new(clock.clone()),
    );

    let pair = service.issue_pair("bob", "user").await.unwrap();

    let access = service.decode(&pair.access_token).unwrap();
    let refresh = service.decode(&pair.refresh_token).unwrap();
    assert_eq!(access.exp, (clock.now() + Duration::minutes(5)).timestamp());
    assert_eq!(refresh.exp, (clock.now() + Duration::hours(1)).timestamp());
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let service = TokenService::new(
        FailingRevocationStore,
        key_manager(),
        TokenServiceConfig::default(),
    );

    let result = service.issue_pair("alice", "admin").await;
    assert!(matches!(result, Err(DomainError::Store { .. })));
}

#[tokio::test]
async fn test_unrepresentable_expiry_is_an_internal_error() {
    let clock = ManualClock::starting_now();
    let store = crate::repositories::InMemoryRevocationStore::new();
    let config = TokenServiceConfig {
        access_token_ttl: Duration::minutes(15),
        // Lands past the last instant chrono can represent
        refresh_token_ttl: Duration::days(100_000_000),
    };
    let service = TokenService::with_clock(
        store.clone(),
        key_manager(),
        config,
        Arc::new(clock.clone()),
    );

    let result = service.issue_pair("alice", "admin").await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    // Nothing registered for a pair that was never handed out
    assert_eq!(store.live_count().await, 0);
}
