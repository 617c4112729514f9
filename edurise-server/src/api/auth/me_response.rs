use crate::api::auth::user_dto::UserDto;
use crate::api::tenants::tenant_dto::TenantDto;

use serde::Serialize;

/// Current session view: the authenticated user and the tenant scope
/// carried by the presented token (absent when the token was
/// tenant-less or its tenant no longer resolves).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
