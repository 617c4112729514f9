use crate::api::auth::token_pair_dto::TokenPairDto;
use crate::api::auth::user_dto::UserDto;
use crate::api::tenants::tenant_dto::TenantDto;
use crate::auth::service::IssuedTokens;

use edurise_core::{Tenant, User};
use serde::Serialize;

/// Envelope returned by register and login: the account, the tenant
/// the session is scoped to (when one resolved), and the token pair.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantDto>,
    pub tokens: TokenPairDto,
}

impl SessionResponse {
    pub fn new(user: &User, tenant: Option<&Tenant>, tokens: IssuedTokens) -> Self {
        Self {
            user: UserDto::from(user),
            tenant: tenant.map(TenantDto::from),
            tokens: TokenPairDto::from(tokens),
        }
    }
}
