//! Per-request bearer authentication.
//!
//! Attaches a `RequestIdentity` to every request exactly once. A
//! missing Authorization header yields the anonymous identity; any
//! present-but-unusable credential is a uniform 401, with the specific
//! reason visible only in debug logs.

use crate::api::error::{ApiError, Result as ApiErrorResult};
use crate::state::AppState;

use std::panic::Location;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use edurise_auth::{Claims, TokenType};
use edurise_core::{Tenant, User};
use edurise_db::{TenantRepository, UserRepository};
use error_location::ErrorLocation;

/// Identity attached to every request by the authentication layer.
///
/// All fields are `None` for anonymous requests; downstream
/// authorization decides whether that is acceptable.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    pub user: Option<User>,
    /// Tenant from the token's tenant block, re-resolved against the
    /// directory at request time. `None` when the token was
    /// tenant-less or its tenant no longer resolves.
    pub tenant: Option<Tenant>,
    pub claims: Option<Claims>,
}

/// Middleware: decode the bearer token, load the subject user, and
/// attach the resulting identity to request extensions.
pub async fn authenticate_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiErrorResult<Response> {
    let identity = match bearer_token(request.headers())? {
        None => RequestIdentity::default(),
        Some(token) => build_identity(&state, &token).await?,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Extract the bearer credential. No Authorization header means
/// anonymous; a header with any other scheme is rejected.
fn bearer_token(headers: &HeaderMap) -> ApiErrorResult<Option<String>> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let credential = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string());

    match credential {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => {
            log::debug!("Authorization header present but not a bearer credential");
            Err(ApiError::InvalidCredential {
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

async fn build_identity(state: &AppState, token: &str) -> ApiErrorResult<RequestIdentity> {
    // Only access tokens authenticate requests; refresh and
    // password-reset tokens are rejected here.
    let claims = state
        .codec
        .decode_expecting(token, TokenType::Access)
        .map_err(|e| {
            log::debug!("Rejected access token: {e}");
            ApiError::from(e)
        })?;

    let user_id = claims.user_id()?;
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| {
            log::debug!("Token subject {user_id} no longer exists");
            ApiError::InvalidCredential {
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

    if !user.is_active {
        // Deactivation invalidates every outstanding token for the
        // account, with no revocation bookkeeping.
        log::debug!("Token subject {user_id} is deactivated");
        return Err(ApiError::InvalidCredential {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // A tenant deleted or suspended since issuance degrades to "no
    // tenant" - the user is still authenticated.
    let tenant = match claims.tenant_uuid() {
        Some(tenant_id) => {
            TenantRepository::new(state.pool.clone())
                .find_active_by_id(tenant_id)
                .await?
        }
        None => None,
    };

    Ok(RequestIdentity {
        user: Some(user),
        tenant,
        claims: Some(claims),
    })
}
