//! Tenant directory lookups.
//!
//! Resolution treats suspended and nonexistent tenants identically:
//! both come back as `None`, so callers cannot distinguish which
//! subdomains exist but are suspended.

use crate::error::is_unique_violation;
use crate::repositories::{parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;
use std::str::FromStr;

use edurise_core::{SubscriptionPlan, Tenant};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct TenantRepository {
    pool: SqlitePool,
}

impl TenantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a tenant row. Provisioning support; the auth core itself
    /// only reads.
    pub async fn create(&self, tenant: &Tenant) -> DbErrorResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tenants (
                id, subdomain, name, is_active, subscription_plan,
                primary_color, secondary_color, logo_url, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tenant.id.to_string())
        .bind(&tenant.subdomain)
        .bind(&tenant.name)
        .bind(tenant.is_active)
        .bind(tenant.subscription_plan.as_str())
        .bind(&tenant.primary_color)
        .bind(&tenant.secondary_color)
        .bind(&tenant.logo_url)
        .bind(tenant.created_at.timestamp())
        .bind(tenant.updated_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::UniqueViolation {
                    entity: "tenants.subdomain",
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                DbError::from(e)
            }
        })?;

        Ok(())
    }

    /// Exact-id lookup, restricted to active tenants
    pub async fn find_active_by_id(&self, id: Uuid) -> DbErrorResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE id = ? AND is_active = 1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_tenant_row(&r)).transpose()
    }

    /// Case-insensitive subdomain lookup, restricted to active tenants
    pub async fn find_active_by_subdomain(&self, subdomain: &str) -> DbErrorResult<Option<Tenant>> {
        let row =
            sqlx::query("SELECT * FROM tenants WHERE lower(subdomain) = lower(?) AND is_active = 1")
                .bind(subdomain)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| map_tenant_row(&r)).transpose()
    }

    /// Flip the active flag. Returns false when no such tenant exists.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> DbErrorResult<bool> {
        let result = sqlx::query("UPDATE tenants SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(is_active)
            .bind(chrono::Utc::now().timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_tenant_row(row: &SqliteRow) -> DbErrorResult<Tenant> {
    let id: String = row.try_get("id")?;
    let plan: String = row.try_get("subscription_plan")?;

    Ok(Tenant {
        id: parse_uuid("tenants", "id", &id)?,
        subdomain: row.try_get("subdomain")?,
        name: row.try_get("name")?,
        is_active: row.try_get("is_active")?,
        subscription_plan: SubscriptionPlan::from_str(&plan).map_err(|e| DbError::CorruptRow {
            table: "tenants",
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        primary_color: row.try_get("primary_color")?,
        secondary_color: row.try_get("secondary_color")?,
        logo_url: row.try_get("logo_url")?,
        created_at: parse_timestamp("tenants", "created_at", row.try_get("created_at")?)?,
        updated_at: parse_timestamp("tenants", "updated_at", row.try_get("updated_at")?)?,
    })
}
