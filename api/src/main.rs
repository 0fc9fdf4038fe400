use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use insapp_api::{create_app, telemetry, AppState};
use insapp_core::services::token::{Rs256KeyManager, TokenService, TokenServiceConfig};
use insapp_infra::build_revocation_store;
use insapp_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    telemetry::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {}", e))?;

    info!(environment = %config.environment, "Starting Insapp API Server");

    let lifetimes =
        TokenServiceConfig::try_from(&config.jwt).context("Invalid JWT token lifetimes")?;

    // Without a valid key pair no token can be signed or verified
    let key_manager = Rs256KeyManager::from_config(&config.jwt)
        .context("Failed to load JWT signing keys")?;

    let store = build_revocation_store(&config.cache)
        .await
        .context("Failed to initialise revocation store")?;

    let token_service = Arc::new(TokenService::new(
        store,
        Arc::new(key_manager),
        lifetimes,
    ));
    let app_state = web::Data::new(AppState::new(token_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
