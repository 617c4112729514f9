//! Authentication orchestration: registration, credential checks,
//! token issuance, refresh and revocation.

use crate::api::error::{ApiError, Result as ApiErrorResult};
use crate::state::AppState;

use std::panic::Location;
use std::sync::Arc;

use edurise_auth::{Claims, IdentityClaims, TenantClaims, TokenCodec, TokenType, password};
use edurise_core::{Membership, Tenant, User};
use edurise_db::{
    DbError, MembershipRepository, RegistrationRepository, RevokedTokenRepository,
    TenantRepository, UserRepository,
};
use error_location::ErrorLocation;
use sqlx::SqlitePool;

/// Registration input, already deserialized and trusted only as far
/// as its shape.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub is_teacher: bool,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub bio: Option<String>,
}

/// A freshly signed access/refresh pair.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds, for client refresh scheduling
    pub expires_in: u64,
}

pub struct AuthService {
    pool: SqlitePool,
    codec: Arc<TokenCodec>,
    min_password_length: usize,
}

impl AuthService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            codec: state.codec.clone(),
            min_password_length: state.min_password_length,
        }
    }

    /// Create an account, and when a tenant is given, its membership in
    /// the same transaction. The membership role follows the teacher
    /// flag; a duplicate email (case-insensitive) is a client error.
    pub async fn register(
        &self,
        input: RegisterInput,
        tenant: Option<&Tenant>,
    ) -> ApiErrorResult<(User, Option<Membership>)> {
        let email = input.email.trim().to_string();
        if email.len() < 3 || !email.contains('@') {
            return Err(ApiError::Validation {
                message: "A valid email address is required".to_string(),
                field: Some("email".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if input.password.chars().count() < self.min_password_length {
            return Err(ApiError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.min_password_length
                ),
                field: Some("password".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password_hash = password::hash_password(&input.password)?;

        let mut user = User::new(email, password_hash);
        user.is_teacher = input.is_teacher;

        let membership = tenant.map(|tenant| {
            let mut membership = Membership::new(user.id, tenant.id, user.default_role());
            if let Some(timezone) = input.timezone {
                membership.timezone = timezone;
            }
            if let Some(language) = input.language {
                membership.language = language;
            }
            membership.bio = input.bio;
            membership
        });

        RegistrationRepository::new(self.pool.clone())
            .create_user_with_membership(&user, membership.as_ref())
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation { .. } => ApiError::DuplicateEmail {
                    location: ErrorLocation::from(Location::caller()),
                },
                other => ApiError::from(other),
            })?;

        log::info!("Registered user {}", user.id);

        Ok((user, membership))
    }

    /// Verify credentials. Unknown email, wrong password and
    /// deactivated account are all the same `None` - nothing in the
    /// result or its timing reveals which one occurred.
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiErrorResult<Option<User>> {
        let user = UserRepository::new(self.pool.clone())
            .find_by_email(email)
            .await?;

        let Some(user) = user else {
            password::verify_dummy(password);
            return Ok(None);
        };

        match password::verify_password(password, &user.password_hash) {
            Ok(true) if user.is_active => Ok(Some(user)),
            Ok(_) => Ok(None),
            Err(e) => {
                // A corrupt stored hash must not distinguish itself
                // from a failed login.
                log::error!("Password verification failed for user {}: {e}", user.id);
                Ok(None)
            }
        }
    }

    /// Sign an access/refresh pair from the current user and tenant
    /// rows. The role claim comes from the membership for that tenant,
    /// when one exists.
    pub async fn issue_tokens(
        &self,
        user: &User,
        tenant: Option<&Tenant>,
    ) -> ApiErrorResult<IssuedTokens> {
        let identity = IdentityClaims::from(user);
        let tenant_claims = self.tenant_claims_for(user, tenant).await?;

        let access = self
            .codec
            .encode(&identity, tenant_claims.as_ref(), TokenType::Access)?;
        let refresh = self
            .codec
            .encode(&identity, tenant_claims.as_ref(), TokenType::Refresh)?;

        Ok(IssuedTokens {
            access,
            refresh,
            expires_in: self.codec.access_ttl_secs(),
        })
    }

    /// Non-throwing decode probe for auxiliary checks
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        self.codec.decode(token).ok()
    }

    /// Single-purpose reset token: short TTL, no tenant block
    pub fn issue_password_reset_token(&self, user: &User) -> ApiErrorResult<String> {
        self.codec
            .encode(&IdentityClaims::from(user), None, TokenType::PasswordReset)
            .map_err(ApiError::from)
    }

    /// Exchange a live refresh token for a new access token.
    ///
    /// Rejects revoked, expired and non-refresh tokens, tokens whose
    /// subject is gone or deactivated - all as the uniform credential
    /// failure. A stale tenant claim degrades to a tenant-less access
    /// token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> ApiErrorResult<String> {
        let claims = self
            .codec
            .decode_expecting(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                log::debug!("Rejected refresh token: {e}");
                ApiError::from(e)
            })?;

        let jti = claims.jti.as_deref().ok_or_else(|| ApiError::InvalidCredential {
            location: ErrorLocation::from(Location::caller()),
        })?;

        if RevokedTokenRepository::new(self.pool.clone())
            .is_revoked(jti)
            .await?
        {
            log::debug!("Refresh token {jti} is revoked");
            return Err(ApiError::InvalidCredential {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let user = UserRepository::new(self.pool.clone())
            .find_by_id(claims.user_id()?)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApiError::InvalidCredential {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let tenant = match claims.tenant_uuid() {
            Some(tenant_id) => {
                TenantRepository::new(self.pool.clone())
                    .find_active_by_id(tenant_id)
                    .await?
            }
            None => None,
        };

        let tenant_claims = self.tenant_claims_for(&user, tenant.as_ref()).await?;

        self.codec
            .encode(
                &IdentityClaims::from(&user),
                tenant_claims.as_ref(),
                TokenType::Access,
            )
            .map_err(ApiError::from)
    }

    /// Blacklist a refresh token.
    ///
    /// Returns false - not an error - when the token is malformed,
    /// expired or not a refresh token, so callers can distinguish
    /// "already invalid" from "successfully revoked". Re-revoking is
    /// idempotent and still true.
    pub async fn revoke_refresh_token(&self, token: &str) -> ApiErrorResult<bool> {
        let claims = match self.codec.decode_expecting(token, TokenType::Refresh) {
            Ok(claims) => claims,
            Err(e) => {
                log::debug!("Refusing to revoke invalid token: {e}");
                return Ok(false);
            }
        };

        let Some(jti) = claims.jti else {
            return Ok(false);
        };

        RevokedTokenRepository::new(self.pool.clone())
            .revoke(&jti, claims.exp)
            .await?;

        log::info!("Revoked refresh token {jti}");

        Ok(true)
    }

    async fn tenant_claims_for(
        &self,
        user: &User,
        tenant: Option<&Tenant>,
    ) -> ApiErrorResult<Option<TenantClaims>> {
        let Some(tenant) = tenant else {
            return Ok(None);
        };

        let role = MembershipRepository::new(self.pool.clone())
            .find_by_user_and_tenant(user.id, tenant.id)
            .await?
            .map(|membership| membership.role);

        Ok(Some(TenantClaims::for_tenant(tenant, role)))
    }
}
