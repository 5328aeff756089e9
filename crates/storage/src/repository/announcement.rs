use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::announcement::{
    AnnouncementFilter, CreateAnnouncementRequest, DEFAULT_AUDIENCE, UpdateAnnouncementRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Announcement;

const ANNOUNCEMENT_COLUMNS: &str =
    "announcement_id, title, description, audience, created_at, updated_at";

pub struct AnnouncementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnnouncementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Newest first, optionally restricted to one audience
    pub async fn list(&self, filter: &AnnouncementFilter) -> Result<Vec<Announcement>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE 1=1"
        ));

        if let Some(ref audience) = filter.audience {
            query.push(" AND audience = ");
            query.push_bind(audience);
        }

        query.push(" ORDER BY created_at DESC");

        let announcements = query
            .build_query_as::<Announcement>()
            .fetch_all(self.pool)
            .await?;

        Ok(announcements)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Announcement> {
        let sql = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE announcement_id = $1"
        );

        let announcement = sqlx::query_as::<_, Announcement>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(announcement)
    }

    pub async fn create(&self, req: &CreateAnnouncementRequest) -> Result<Announcement> {
        let sql = format!(
            r#"
            INSERT INTO announcements (title, description, audience)
            VALUES ($1, $2, $3)
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        );

        let announcement = sqlx::query_as::<_, Announcement>(&sql)
            .bind(&req.title)
            .bind(&req.description)
            .bind(req.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE))
            .fetch_one(self.pool)
            .await?;

        Ok(announcement)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateAnnouncementRequest) -> Result<Announcement> {
        let sql = format!(
            r#"
            UPDATE announcements
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                audience = COALESCE($4, audience),
                updated_at = NOW()
            WHERE announcement_id = $1
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        );

        let announcement = sqlx::query_as::<_, Announcement>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(&req.description)
            .bind(&req.audience)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(announcement)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM announcements WHERE announcement_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
