//! CORS middleware configuration for cross-origin requests.
//!
//! Browser and mobile clients send both tokens on every protected call and
//! read the renewed ones back from the response headers, so those headers are
//! allowed on requests and exposed on responses.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use super::auth::REFRESH_TOKEN_HEADER;

/// Creates a CORS middleware instance.
///
/// The request origin is reflected back with credentials allowed.
///
/// # Environment Variables
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors() -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3600);

    Cors::default()
        .allowed_origin_fn(|_origin, _request| true)
        .allowed_methods(vec![
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
        .expose_headers(vec![
            header::CONTENT_RANGE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
        .max_age(max_age)
        .supports_credentials()
}
