//! User account storage.

use crate::error::is_unique_violation;
use crate::repositories::{parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use edurise_core::User;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user row. A case-insensitive email conflict surfaces
    /// as `DbError::UniqueViolation`.
    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(insert_user_sql())
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .bind(user.is_teacher)
            .bind(user.is_approved_teacher)
            .bind(user.created_at.timestamp())
            .bind(user.updated_at.timestamp())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::UniqueViolation {
                        entity: "users.email",
                        location: ErrorLocation::from(Location::caller()),
                    }
                } else {
                    DbError::from(e)
                }
            })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    /// Case-insensitive email lookup
    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE lower(email) = lower(?)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    /// Flip the active flag. Deactivation immediately invalidates every
    /// outstanding token naming this user, with no revocation
    /// bookkeeping: request authentication re-reads this flag.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> DbErrorResult<bool> {
        let result = sqlx::query("UPDATE users SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(is_active)
            .bind(chrono::Utc::now().timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) fn insert_user_sql() -> &'static str {
    r#"
    INSERT INTO users (
        id, email, password_hash, is_active, is_staff, is_superuser,
        is_teacher, is_approved_teacher, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    "#
}

pub(crate) fn map_user_row(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;

    Ok(User {
        id: parse_uuid("users", "id", &id)?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        is_active: row.try_get("is_active")?,
        is_staff: row.try_get("is_staff")?,
        is_superuser: row.try_get("is_superuser")?,
        is_teacher: row.try_get("is_teacher")?,
        is_approved_teacher: row.try_get("is_approved_teacher")?,
        created_at: parse_timestamp("users", "created_at", row.try_get("created_at")?)?,
        updated_at: parse_timestamp("users", "updated_at", row.try_get("updated_at")?)?,
    })
}
