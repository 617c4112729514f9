//! Tenant entity - an organization with its own users and branding.

use crate::SubscriptionPlan;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant is a customer organization. Requests are scoped to at most
/// one tenant, resolved from a header hint or the request host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Unique lowercase label used for host-based routing
    /// (e.g. "acme" in acme.edurise.com). Immutable once routing
    /// depends on it.
    pub subdomain: String,
    pub name: String,
    /// Suspended tenants resolve identically to nonexistent ones.
    pub is_active: bool,
    pub subscription_plan: SubscriptionPlan,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a new active tenant on the default plan
    pub fn new(name: impl Into<String>, subdomain: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subdomain: subdomain.into().to_lowercase(),
            name: name.into(),
            is_active: true,
            subscription_plan: SubscriptionPlan::Basic,
            primary_color: None,
            secondary_color: None,
            logo_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
