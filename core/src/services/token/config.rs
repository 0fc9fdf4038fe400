//! Configuration for the token service

use chrono::Duration;
use insapp_shared::config::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_HOURS};
use crate::errors::ConfigError;

/// Longest lifetime accepted for either token kind (ten years)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 3600;

/// Lifetimes applied when tokens are minted or extended
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime, measured from the last extension
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_ttl: Duration::hours(REFRESH_TOKEN_EXPIRY_HOURS),
        }
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            access_token_ttl: lifetime("JWT_ACCESS_TOKEN_EXPIRY", config.access_token_expiry)?,
            refresh_token_ttl: lifetime("JWT_REFRESH_TOKEN_EXPIRY", config.refresh_token_expiry)?,
        })
    }
}

fn lifetime(name: &'static str, seconds: i64) -> Result<Duration, ConfigError> {
    if seconds <= 0 {
        return Err(ConfigError::NonPositiveLifetime { name, seconds });
    }
    if seconds > MAX_TOKEN_LIFETIME_SECONDS {
        return Err(ConfigError::LifetimeTooLong {
            name,
            seconds,
            max: MAX_TOKEN_LIFETIME_SECONDS,
        });
    }

    Ok(Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_jwt_config_converts() {
        let config = TokenServiceConfig::try_from(&JwtConfig::default()).unwrap();

        assert_eq!(config.access_token_ttl, Duration::minutes(15));
        assert_eq!(config.refresh_token_ttl, Duration::hours(72));
    }

    #[test]
    fn test_non_positive_lifetimes_are_rejected() {
        let mut jwt = JwtConfig::default();
        jwt.access_token_expiry = 0;

        assert_eq!(
            TokenServiceConfig::try_from(&jwt).unwrap_err(),
            ConfigError::NonPositiveLifetime {
                name: "JWT_ACCESS_TOKEN_EXPIRY",
                seconds: 0
            }
        );

        let mut jwt = JwtConfig::default();
        jwt.refresh_token_expiry = -60;

        assert!(matches!(
            TokenServiceConfig::try_from(&jwt),
            Err(ConfigError::NonPositiveLifetime {
                name: "JWT_REFRESH_TOKEN_EXPIRY",
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_lifetime_is_rejected() {
        let mut jwt = JwtConfig::default();
        jwt.refresh_token_expiry = 1_000_000_000_000_000;

        assert!(matches!(
            TokenServiceConfig::try_from(&jwt),
            Err(ConfigError::LifetimeTooLong {
                name: "JWT_REFRESH_TOKEN_EXPIRY",
                ..
            })
        ));

        jwt.refresh_token_expiry = i64::MAX;
        assert!(TokenServiceConfig::try_from(&jwt).is_err());
    }

    #[test]
    fn test_maximum_lifetime_is_accepted() {
        let mut jwt = JwtConfig::default();
        jwt.refresh_token_expiry = MAX_TOKEN_LIFETIME_SECONDS;

        let config = TokenServiceConfig::try_from(&jwt).unwrap();
        assert_eq!(
            config.refresh_token_ttl,
            Duration::seconds(MAX_TOKEN_LIFETIME_SECONDS)
        );
    }
}
