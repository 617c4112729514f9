//! Membership storage - the (user, tenant) join records.

use crate::repositories::{parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;
use std::str::FromStr;

use edurise_core::{Membership, MembershipRole};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct MembershipRepository {
    pool: SqlitePool,
}

impl MembershipRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Idempotent add-to-tenant.
    ///
    /// The UNIQUE(user_id, tenant_id) constraint plus ON CONFLICT DO
    /// NOTHING makes concurrent duplicate creation race-free; when a
    /// membership already exists it is returned unchanged, role
    /// included.
    pub async fn get_or_create(&self, membership: &Membership) -> DbErrorResult<Membership> {
        sqlx::query(insert_membership_sql())
            .bind(membership.id.to_string())
            .bind(membership.user_id.to_string())
            .bind(membership.tenant_id.to_string())
            .bind(membership.role.as_str())
            .bind(&membership.timezone)
            .bind(&membership.language)
            .bind(&membership.bio)
            .bind(membership.created_at.timestamp())
            .execute(&self.pool)
            .await?;

        self.find_by_user_and_tenant(membership.user_id, membership.tenant_id)
            .await?
            .ok_or_else(|| DbError::Sqlx {
                source: sqlx::Error::RowNotFound,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn find_by_user_and_tenant(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> DbErrorResult<Option<Membership>> {
        let row = sqlx::query("SELECT * FROM memberships WHERE user_id = ? AND tenant_id = ?")
            .bind(user_id.to_string())
            .bind(tenant_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_membership_row(&r)).transpose()
    }
}

pub(crate) fn insert_membership_sql() -> &'static str {
    r#"
    INSERT INTO memberships (
        id, user_id, tenant_id, role, timezone, language, bio, created_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (user_id, tenant_id) DO NOTHING
    "#
}

pub(crate) fn map_membership_row(row: &SqliteRow) -> DbErrorResult<Membership> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let tenant_id: String = row.try_get("tenant_id")?;
    let role: String = row.try_get("role")?;

    Ok(Membership {
        id: parse_uuid("memberships", "id", &id)?,
        user_id: parse_uuid("memberships", "user_id", &user_id)?,
        tenant_id: parse_uuid("memberships", "tenant_id", &tenant_id)?,
        role: MembershipRole::from_str(&role).map_err(|e| DbError::CorruptRow {
            table: "memberships",
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        timezone: row.try_get("timezone")?,
        language: row.try_get("language")?,
        bio: row.try_get("bio")?,
        created_at: parse_timestamp("memberships", "created_at", row.try_get("created_at")?)?,
    })
}
