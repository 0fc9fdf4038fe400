//! # Insapp API
//!
//! Actix-web surface over the session-token core: token refresh, logout and
//! a session guard that renews credentials on every protected call.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
