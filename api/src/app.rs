//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, App, HttpRequest, HttpResponse};
use tracing_actix_web::TracingLogger;

use insapp_core::repositories::RevocationStore;
use insapp_core::services::token::TokenService;

use crate::dto::ErrorResponse;
use crate::handlers::error::ApiError;
use crate::middleware::{auth::SessionGuard, cors::create_cors};
use crate::routes::auth::{logout::logout, me::me, refresh::refresh};
use crate::routes::health::health_check;

/// State shared by every worker
pub struct AppState<S: RevocationStore> {
    pub token_service: Arc<TokenService<S>>,
}

impl<S: RevocationStore> AppState<S> {
    pub fn new(token_service: Arc<TokenService<S>>) -> Self {
        Self { token_service }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: RevocationStore + 'static,
{
    let session_guard = SessionGuard::new(Arc::clone(&app_state.token_service));

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors())
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/refresh", web::post().to(refresh::<S>))
                    .route("/logout", web::post().to(logout::<S>))
                    .service(
                        web::resource("/me")
                            .wrap(session_guard)
                            .route(web::get().to(me)),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(ErrorResponse::new(
                "not_found",
                "The requested resource was not found",
            ))
        }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}
