//! Authentication route handlers
//!
//! - Token refresh
//! - Logout
//! - Current session lookup behind the session guard

pub mod logout;
pub mod me;
pub mod refresh;
