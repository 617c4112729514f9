//! Axum extractors for authenticated handlers

use crate::api::error::ApiError;
use crate::auth::authenticator::RequestIdentity;
use crate::state::AppState;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use edurise_auth::Claims;
use edurise_core::{Tenant, User};
use error_location::ErrorLocation;

/// Extracts the authenticated user from the request identity.
///
/// Rejects anonymous requests with the uniform credential failure -
/// handlers using this extractor implicitly require authentication.
pub struct CurrentUser {
    pub user: User,
    /// The token's tenant, already re-resolved by the authenticator
    pub tenant: Option<Tenant>,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let identity = parts
                .extensions
                .get::<RequestIdentity>()
                .cloned()
                .unwrap_or_default();

            match (identity.user, identity.claims) {
                (Some(user), Some(claims)) => Ok(CurrentUser {
                    user,
                    tenant: identity.tenant,
                    claims,
                }),
                _ => Err(ApiError::InvalidCredential {
                    location: ErrorLocation::from(Location::caller()),
                }),
            }
        }
    }
}
