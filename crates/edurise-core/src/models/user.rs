//! User account entity.

use crate::MembershipRole;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform account. Email is the login identifier and is unique
/// case-insensitively; there is no separate username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string. Never serialized into responses or logs.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    /// Platform-level accounts exempt from tenant membership checks.
    pub is_superuser: bool,
    pub is_teacher: bool,
    pub is_approved_teacher: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an active, unprivileged account
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            is_teacher: false,
            is_approved_teacher: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Role granted when this account joins a tenant at registration
    pub fn default_role(&self) -> MembershipRole {
        if self.is_teacher {
            MembershipRole::Teacher
        } else {
            MembershipRole::Student
        }
    }
}
