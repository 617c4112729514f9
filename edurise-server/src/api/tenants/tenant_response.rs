use crate::api::tenants::tenant_dto::TenantDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TenantResponse {
    pub tenant: TenantDto,
}
