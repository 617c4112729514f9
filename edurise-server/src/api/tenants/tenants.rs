//! Public tenant lookup, used by clients for pre-login branding.

use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::tenants::tenant_dto::TenantDto;
use crate::api::tenants::tenant_response::TenantResponse;
use crate::state::AppState;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use edurise_db::TenantRepository;
use error_location::ErrorLocation;

/// GET /api/v1/tenants/by-subdomain/{subdomain}
///
/// Suspended and nonexistent tenants are both a plain 404.
pub async fn get_by_subdomain(
    State(state): State<AppState>,
    Path(subdomain): Path<String>,
) -> ApiResult<Json<TenantResponse>> {
    let tenant = TenantRepository::new(state.pool.clone())
        .find_active_by_subdomain(&subdomain)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Tenant '{}' not found", subdomain),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(TenantResponse {
        tenant: TenantDto::from(&tenant),
    }))
}
