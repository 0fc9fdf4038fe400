//! End-to-end session lifecycle over the public API

use std::sync::Arc;

use chrono::Duration;

use insapp_core::{
    DomainError, InMemoryRevocationStore, ManualClock, RevocationStore, Rs256KeyManager,
    TokenService, TokenServiceConfig,
};

const PRIVATE_KEY: &str = include_str!("fixtures/jwt_private_key.pem");
const PUBLIC_KEY: &str = include_str!("fixtures/jwt_public_key.pem");

fn service_with_clock() -> (TokenService<InMemoryRevocationStore>, InMemoryRevocationStore, ManualClock) {
    let store = InMemoryRevocationStore::new();
    let clock = ManualClock::starting_now();
    let keys = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap();

    let service = TokenService::with_clock(
        store.clone(),
        Arc::new(keys),
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    );

    (service, store, clock)
}

#[tokio::test]
async fn test_alice_session_from_login_to_expiry() {
    let (service, store, clock) = service_with_clock();

    let pair = service.issue_pair("alice", "admin").await.unwrap();
    let jti = service.decode(&pair.refresh_token).unwrap().jti.unwrap();

    // Immediately after login
    let renewal = service
        .check_and_refresh(&pair.access_token, &pair.refresh_token)
        .await
        .unwrap();
    assert_eq!(renewal.access_token, pair.access_token);
    assert_eq!(renewal.claims.username, "alice");
    assert_eq!(renewal.claims.role, "admin");

    // Access token has expired
    clock.advance(Duration::minutes(16));
    let renewal = service
        .check_and_refresh(&pair.access_token, &pair.refresh_token)
        .await
        .unwrap();
    assert!(renewal.renewed);
    assert_ne!(renewal.access_token, pair.access_token);

    let claims = service.decode(&renewal.access_token).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, "admin");

    // Original refresh token is past its 72 hours
    clock.advance(Duration::hours(72));
    let result = service
        .check_and_refresh(&pair.access_token, &pair.refresh_token)
        .await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
    assert!(!store.is_valid(&jti).await.unwrap());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (service, store, clock) = service_with_clock();

    let pair = service.issue_pair("bob", "user").await.unwrap();
    service.revoke(&pair.refresh_token).await.unwrap();
    assert_eq!(store.live_count().await, 0);

    clock.advance(Duration::minutes(20));
    let result = service
        .check_and_refresh(&pair.access_token, &pair.refresh_token)
        .await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));

    // Logging out twice is harmless
    service.revoke(&pair.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_dyn_store_behind_arc() {
    let store: Arc<dyn RevocationStore> = Arc::new(InMemoryRevocationStore::new());
    let keys = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap();
    let service = TokenService::new(Arc::clone(&store), Arc::new(keys), TokenServiceConfig::default());

    let pair = service.issue_pair("carol", "user").await.unwrap();
    let jti = service.decode(&pair.refresh_token).unwrap().jti.unwrap();

    assert!(store.is_valid(&jti).await.unwrap());
}
