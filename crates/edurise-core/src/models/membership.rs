//! Membership entity - the (user, tenant) join record.

use crate::MembershipRole;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grants one user a role within one tenant, plus tenant-local
/// preferences. A user holds at most one membership per tenant but may
/// belong to many tenants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: MembershipRole,
    pub timezone: String,
    pub language: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Create a membership with default preferences
    pub fn new(user_id: Uuid, tenant_id: Uuid, role: MembershipRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            tenant_id,
            role,
            timezone: "UTC".to_string(),
            language: "en".to_string(),
            bio: None,
            created_at: Utc::now(),
        }
    }
}
