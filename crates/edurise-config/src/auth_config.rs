use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_MIN_PASSWORD_LENGTH,
    DEFAULT_PASSWORD_RESET_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS, MIN_JWT_SECRET_CHARS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric HS256 signing secret. Required at startup; there is
    /// no unauthenticated mode.
    pub jwt_secret: Option<String>,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub password_reset_ttl_secs: u64,
    /// Clock skew tolerance for token expiry checks
    pub leeway_secs: u64,
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
            password_reset_ttl_secs: DEFAULT_PASSWORD_RESET_TTL_SECS,
            leeway_secs: 0,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set EDURISE_AUTH_JWT_SECRET or config.toml)",
                ));
            }
            Some(secret) if secret.len() < MIN_JWT_SECRET_CHARS => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters, got {}",
                    MIN_JWT_SECRET_CHARS,
                    secret.len()
                )));
            }
            Some(_) => {}
        }

        if self.access_token_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.access_token_ttl_secs must be > 0"));
        }
        if self.refresh_token_ttl_secs <= self.access_token_ttl_secs {
            return Err(ConfigError::auth(
                "auth.refresh_token_ttl_secs must exceed access_token_ttl_secs",
            ));
        }
        if self.password_reset_ttl_secs == 0 {
            return Err(ConfigError::auth(
                "auth.password_reset_ttl_secs must be > 0",
            ));
        }

        Ok(())
    }
}
