//! Type definitions shared between the service crates

pub mod response;

pub use response::{ErrorResponse, HealthResponse};
