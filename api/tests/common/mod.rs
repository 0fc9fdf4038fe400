//! Shared setup for HTTP tests

use std::sync::Arc;

use actix_web::web;
use insapp_api::AppState;
use insapp_core::repositories::InMemoryRevocationStore;
use insapp_core::services::clock::ManualClock;
use insapp_core::services::token::{Rs256KeyManager, TokenService, TokenServiceConfig};

const PRIVATE_KEY: &str = include_str!("../../../core/tests/fixtures/jwt_private_key.pem");
const PUBLIC_KEY: &str = include_str!("../../../core/tests/fixtures/jwt_public_key.pem");

pub struct TestContext {
    pub state: web::Data<AppState<InMemoryRevocationStore>>,
    pub service: Arc<TokenService<InMemoryRevocationStore>>,
    pub store: InMemoryRevocationStore,
    pub clock: ManualClock,
}

pub fn test_context() -> TestContext {
    let store = InMemoryRevocationStore::new();
    let clock = ManualClock::starting_now();
    let keys = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap();

    let service = Arc::new(TokenService::with_clock(
        store.clone(),
        Arc::new(keys),
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    ));
    let state = web::Data::new(AppState::new(Arc::clone(&service)));

    TestContext {
        state,
        service,
        store,
        clock,
    }
}
