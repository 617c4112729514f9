use crate::auth::service::IssuedTokens;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}

impl From<IssuedTokens> for TokenPairDto {
    fn from(tokens: IssuedTokens) -> Self {
        Self {
            access: tokens.access,
            refresh: tokens.refresh,
            expires_in: tokens.expires_in,
        }
    }
}
