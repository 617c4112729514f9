//! Per-request tenant resolution.
//!
//! Resolution never rejects a request: an unresolvable hint falls
//! through, and "no tenant" is a valid outcome for tenant-agnostic
//! endpoints (health, login, registration). Enforcement happens later
//! in the membership guard.

use crate::state::AppState;
use crate::tenancy::subdomain::candidate_subdomain;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use edurise_core::Tenant;
use edurise_db::TenantRepository;
use uuid::Uuid;

/// Explicit tenant hint header, taking precedence over the host
pub const TENANT_ID_HEADER: &str = "X-Tenant-ID";
pub const TENANT_NAME_HEADER: &str = "X-Tenant-Name";
pub const TENANT_SUBDOMAIN_HEADER: &str = "X-Tenant-Subdomain";
pub const TENANT_PRIMARY_COLOR_HEADER: &str = "X-Tenant-Primary-Color";

/// Tenant resolved for this request, populated exactly once by the
/// resolution middleware. `None` is a valid state.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTenant(pub Option<Tenant>);

/// Middleware: resolve the request's tenant from the `X-Tenant-ID`
/// header or the host subdomain, attach it to request extensions, and
/// mirror it onto response headers for observability.
pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let tenant = resolve(&state, request.headers()).await;
    request.extensions_mut().insert(ResolvedTenant(tenant.clone()));

    let mut response = next.run(request).await;

    if let Some(tenant) = tenant {
        mirror_tenant_headers(response.headers_mut(), &tenant);
    }

    response
}

async fn resolve(state: &AppState, headers: &HeaderMap) -> Option<Tenant> {
    let repo = TenantRepository::new(state.pool.clone());

    // Header-first: an explicit hint wins, but a bad hint only falls
    // through to host resolution, it never fails the request.
    if let Some(id) = tenant_id_hint(headers) {
        match repo.find_active_by_id(id).await {
            Ok(Some(tenant)) => return Some(tenant),
            Ok(None) => {}
            Err(e) => log::warn!("Tenant lookup by id failed: {e}"),
        }
    }

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok())?;
    let candidate = candidate_subdomain(host, &state.tenancy.reserved_subdomains)?;

    match repo.find_active_by_subdomain(candidate).await {
        Ok(tenant) => tenant,
        Err(e) => {
            log::warn!("Tenant lookup by subdomain failed: {e}");
            None
        }
    }
}

fn tenant_id_hint(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(TENANT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
}

fn mirror_tenant_headers(headers: &mut HeaderMap, tenant: &Tenant) {
    if let Ok(value) = HeaderValue::from_str(&tenant.id.to_string()) {
        headers.insert(TENANT_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&tenant.name) {
        headers.insert(TENANT_NAME_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&tenant.subdomain) {
        headers.insert(TENANT_SUBDOMAIN_HEADER, value);
    }
    if let Some(color) = tenant.primary_color.as_deref()
        && let Ok(value) = HeaderValue::from_str(color)
    {
        headers.insert(TENANT_PRIMARY_COLOR_HEADER, value);
    }
}
