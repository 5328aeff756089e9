use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

/// Token ids invalidated by logout, kept until the token would have expired anyway.
pub struct RevokedTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RevokedTokenRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Revoking an already revoked token is a no-op
    pub async fn revoke(&self, jti: Uuid, expires_at: NaiveDateTime) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    pub async fn is_revoked(&self, jti: Uuid) -> Result<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(self.pool)
        .await?;

        Ok(revoked)
    }

    /// Drop entries whose tokens have expired, returning how many were removed
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
