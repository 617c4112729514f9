//! Atomic registration write path.
//!
//! Registration with a tenant must create the user and its membership
//! together or not at all, so both inserts run in one transaction.

use crate::error::is_unique_violation;
use crate::repositories::membership_repository::insert_membership_sql;
use crate::repositories::user_repository::insert_user_sql;
use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use edurise_core::{Membership, User};
use error_location::ErrorLocation;
use sqlx::SqlitePool;

pub struct RegistrationRepository {
    pool: SqlitePool,
}

impl RegistrationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user and, when registering into a tenant, its
    /// membership in a single transaction.
    ///
    /// An email conflict rolls everything back and surfaces as
    /// `DbError::UniqueViolation`.
    pub async fn create_user_with_membership(
        &self,
        user: &User,
        membership: Option<&Membership>,
    ) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

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
            .execute(&mut *tx)
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

        if let Some(membership) = membership {
            sqlx::query(insert_membership_sql())
                .bind(membership.id.to_string())
                .bind(membership.user_id.to_string())
                .bind(membership.tenant_id.to_string())
                .bind(membership.role.as_str())
                .bind(&membership.timezone)
                .bind(&membership.language)
                .bind(&membership.bio)
                .bind(membership.created_at.timestamp())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
