//! Encoding and verification of signed claim sets

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::{debug, error};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::key_manager::Rs256KeyManager;

/// Result of inspecting a token string
///
/// Callers branch on this closed set instead of on library error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerdict {
    /// Signature verifies and `exp` is in the future
    Valid(Claims),
    /// Signature verifies but `exp` has passed
    Expired(Claims),
    /// Not a token signed by our key
    Malformed,
}

impl TokenVerdict {
    /// Claims carried by the token, expired or not
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            TokenVerdict::Valid(claims) | TokenVerdict::Expired(claims) => Some(claims),
            TokenVerdict::Malformed => None,
        }
    }

    /// Converts to a result where only a live token succeeds
    pub fn into_result(self) -> Result<Claims, TokenError> {
        match self {
            TokenVerdict::Valid(claims) => Ok(claims),
            TokenVerdict::Expired(_) => Err(TokenError::Expired),
            TokenVerdict::Malformed => Err(TokenError::Malformed),
        }
    }
}

/// RS256 codec bound to the process key pair and a clock
#[derive(Debug, Clone)]
pub struct TokenCodec {
    keys: Arc<Rs256KeyManager>,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec signing with `keys` and judging expiry against `clock`
    pub fn new(keys: Arc<Rs256KeyManager>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // Expiry is checked against the injected clock in `inspect`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys,
            clock,
            validation,
        }
    }

    /// Current instant according to the codec's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Serializes and signs claims
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(
            &Header::new(Algorithm::RS256),
            claims,
            self.keys.encoding_key(),
        )
        .map_err(|e| {
            error!("Failed to sign token: {}", e);
            DomainError::Internal {
                message: format!("Token signing failed: {}", e),
            }
        })
    }

    /// Verifies signature and shape, then classifies the expiry
    pub fn inspect(&self, token: &str) -> TokenVerdict {
        match decode::<Claims>(token, self.keys.decoding_key(), &self.validation) {
            Ok(data) if data.claims.is_expired_at(self.now()) => {
                TokenVerdict::Expired(data.claims)
            }
            Ok(data) => TokenVerdict::Valid(data.claims),
            Err(e) => {
                debug!("Rejected token: {}", e);
                TokenVerdict::Malformed
            }
        }
    }

    /// Decodes a token that must be both well-formed and unexpired
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.inspect(token).into_result()
    }

    /// Decodes a well-formed token whatever its expiration
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<Claims, TokenError> {
        match self.inspect(token) {
            TokenVerdict::Valid(claims) | TokenVerdict::Expired(claims) => Ok(claims),
            TokenVerdict::Malformed => Err(TokenError::Malformed),
        }
    }
}
