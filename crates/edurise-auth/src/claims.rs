use crate::{AuthError, Result as AuthErrorResult, TokenType};

use std::panic::Location;

use edurise_core::{MembershipRole, Tenant, User};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signed claims carried by every issued token.
///
/// The tenant block (`tenant_id`/`tenant_subdomain`/`tenant_name`) is
/// present only on tenant-scoped tokens and is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id as UUID string)
    pub sub: String,
    pub email: String,
    pub is_teacher: bool,
    pub is_approved_teacher: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    /// Role within the embedded tenant, if the user held a membership
    /// at issuance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Unique token ID consulted by the revocation store.
    /// Refresh tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if Uuid::parse_str(&self.sub).is_err() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub is not a valid UUID".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.email.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "email".to_string(),
                message: "email cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let tenant_parts = [
            self.tenant_id.is_some(),
            self.tenant_subdomain.is_some(),
            self.tenant_name.is_some(),
        ];
        if tenant_parts.iter().any(|p| *p) && !tenant_parts.iter().all(|p| *p) {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant block is incomplete".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.token_type == TokenType::Refresh && self.jti.is_none() {
            return Err(AuthError::InvalidClaim {
                claim: "jti".to_string(),
                message: "refresh token is missing jti".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Subject as a UUID. `validate()` guarantees this parses.
    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("sub is not a valid UUID: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Embedded tenant ID, if this token is tenant-scoped and the
    /// claim parses as a UUID
    pub fn tenant_uuid(&self) -> Option<Uuid> {
        self.tenant_id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
    }
}

/// User-derived claim fields, read from the current user row at
/// issuance time (never from a cached or previously decoded token).
#[derive(Debug, Clone)]
pub struct IdentityClaims {
    pub user_id: Uuid,
    pub email: String,
    pub is_teacher: bool,
    pub is_approved_teacher: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<&User> for IdentityClaims {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            is_teacher: user.is_teacher,
            is_approved_teacher: user.is_approved_teacher,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

/// Tenant-derived claim fields for tenant-scoped tokens.
#[derive(Debug, Clone)]
pub struct TenantClaims {
    pub tenant_id: Uuid,
    pub subdomain: String,
    pub name: String,
    pub role: Option<String>,
}

impl TenantClaims {
    /// Build the tenant block from a tenant row and the caller's
    /// membership role in it (None when no membership exists)
    pub fn for_tenant(tenant: &Tenant, role: Option<MembershipRole>) -> Self {
        Self {
            tenant_id: tenant.id,
            subdomain: tenant.subdomain.clone(),
            name: tenant.name.clone(),
            role: role.map(|r| r.as_str().to_string()),
        }
    }
}
