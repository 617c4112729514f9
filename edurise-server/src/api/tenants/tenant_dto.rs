use edurise_core::{SubscriptionPlan, Tenant};
use serde::Serialize;
use uuid::Uuid;

/// Client-facing view of a tenant, branding included - used for
/// pre-login theming and in session envelopes.
#[derive(Debug, Serialize)]
pub struct TenantDto {
    pub id: Uuid,
    pub subdomain: String,
    pub name: String,
    pub subscription_plan: SubscriptionPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl From<&Tenant> for TenantDto {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            subdomain: tenant.subdomain.clone(),
            name: tenant.name.clone(),
            subscription_plan: tenant.subscription_plan,
            primary_color: tenant.primary_color.clone(),
            secondary_color: tenant.secondary_color.clone(),
            logo_url: tenant.logo_url.clone(),
        }
    }
}
