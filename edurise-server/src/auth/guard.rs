//! Tenant membership enforcement for guarded routes.

use crate::api::error::{ApiError, Result as ApiErrorResult};
use crate::auth::authenticator::RequestIdentity;
use crate::state::AppState;
use crate::tenancy::resolver::ResolvedTenant;

use std::panic::Location;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use edurise_db::MembershipRepository;
use error_location::ErrorLocation;

/// Middleware: when the request carries both an authenticated user and
/// a resolved tenant, require a membership for that pair.
///
/// Superusers bypass the check; this is the single place the
/// capability is consulted. Anonymous or tenant-less requests pass
/// through - membership is only meaningful when both sides exist.
pub async fn enforce_tenant_membership(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiErrorResult<Response> {
    let user = request
        .extensions()
        .get::<RequestIdentity>()
        .and_then(|identity| identity.user.clone());
    let tenant = request
        .extensions()
        .get::<ResolvedTenant>()
        .and_then(|resolved| resolved.0.clone());

    if let (Some(user), Some(tenant)) = (user, tenant)
        && !user.is_superuser
    {
        let membership = MembershipRepository::new(state.pool.clone())
            .find_by_user_and_tenant(user.id, tenant.id)
            .await?;

        if membership.is_none() {
            log::debug!("User {} has no membership in tenant {}", user.id, tenant.id);
            return Err(ApiError::TenantAccessDenied {
                message: format!("No access to tenant '{}'", tenant.subdomain),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    Ok(next.run(request).await)
}
