//! Refresh-token blacklist.

use crate::Result as DbErrorResult;

use sqlx::{Row, SqlitePool};

pub struct RevokedTokenRepository {
    pool: SqlitePool,
}

impl RevokedTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a refresh token's jti as revoked.
    ///
    /// INSERT OR IGNORE: re-revoking the same jti (double logout,
    /// concurrent logout) is a no-op, not an error.
    pub async fn revoke(&self, jti: &str, expires_at: i64) -> DbErrorResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO revoked_tokens (jti, revoked_at, expires_at) VALUES (?, ?, ?)",
        )
        .bind(jti)
        .bind(chrono::Utc::now().timestamp())
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn is_revoked(&self, jti: &str) -> DbErrorResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM revoked_tokens WHERE jti = ?")
            .bind(jti)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("n")?;
        Ok(count > 0)
    }

    /// Delete records whose token has passed its natural expiry.
    /// Returns the number of rows removed.
    pub async fn purge_expired(&self, now: i64) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
