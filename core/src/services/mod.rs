//! Business services containing the session-token logic.

pub mod clock;
pub mod token;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{
    RefreshProtocol, RevocationController, Rs256KeyManager, TokenCodec, TokenIssuer,
    TokenService, TokenServiceConfig, TokenVerdict,
};
