//! Token encode/decode with HMAC-SHA256 signatures.

use crate::{AuthError, Claims, IdentityClaims, Result as AuthErrorResult, TenantClaims, TokenType};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// Signing configuration, constructed explicitly and handed to the
/// codec. The secret is never read from ambient process state.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric HS256 signing secret (at least 32 bytes)
    pub secret: String,
    /// Access token lifetime in seconds (default: 900 = 15 minutes)
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds (default: 604800 = 7 days)
    pub refresh_ttl_secs: u64,
    /// Password-reset token lifetime in seconds (default: 900)
    pub password_reset_ttl_secs: u64,
    /// Clock skew tolerance for expiry checks. Strict by default.
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
            password_reset_ttl_secs: 900,
            leeway_secs: 0,
        }
    }
}

/// Stateless encoder/decoder for all three token kinds.
///
/// Decode order is signature first, then expiry, then claim shape -
/// a token that fails the signature check is rejected before its
/// payload is interpreted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
    password_reset_ttl_secs: u64,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
            password_reset_ttl_secs: config.password_reset_ttl_secs,
        }
    }

    /// Issue a signed token of the given kind.
    ///
    /// `iat` and `exp` come from a single clock read; refresh tokens
    /// get a fresh `jti` for the revocation store.
    #[track_caller]
    pub fn encode(
        &self,
        identity: &IdentityClaims,
        tenant: Option<&TenantClaims>,
        token_type: TokenType,
    ) -> AuthErrorResult<String> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: identity.user_id.to_string(),
            email: identity.email.clone(),
            is_teacher: identity.is_teacher,
            is_approved_teacher: identity.is_approved_teacher,
            is_staff: identity.is_staff,
            is_superuser: identity.is_superuser,
            tenant_id: tenant.map(|t| t.tenant_id.to_string()),
            tenant_subdomain: tenant.map(|t| t.subdomain.clone()),
            tenant_name: tenant.map(|t| t.name.clone()),
            role: tenant.and_then(|t| t.role.clone()),
            token_type,
            jti: (token_type == TokenType::Refresh).then(|| Uuid::new_v4().to_string()),
            iat: now,
            exp: now + self.ttl_secs(token_type) as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Crypto {
                message: format!("JWT encode failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify signature and expiry, then return the claims
    #[track_caller]
    pub fn decode(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    ErrorKind::InvalidSignature => AuthError::SignatureMismatch {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::MalformedToken {
                        message: e.to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Decode, additionally requiring a specific token kind
    #[track_caller]
    pub fn decode_expecting(
        &self,
        token: &str,
        expected: TokenType,
    ) -> AuthErrorResult<Claims> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType {
                expected,
                actual: claims.token_type,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(claims)
    }

    /// Access token lifetime, surfaced so clients can schedule refresh
    pub fn access_ttl_secs(&self) -> u64 {
        self.access_ttl_secs
    }

    fn ttl_secs(&self, token_type: TokenType) -> u64 {
        match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
            TokenType::PasswordReset => self.password_reset_ttl_secs,
        }
    }
}
