//! Revocation store module for refresh-token liveness.

mod r#trait;
pub use r#trait::RevocationStore;

mod memory;
pub use memory::InMemoryRevocationStore;
