use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ImageRef;
use crate::dto::news::{CreateNewsRequest, UpdateNewsRequest};
use crate::error::{Result, StorageError};
use crate::models::News;

const NEWS_COLUMNS: &str = "news_id, title, content, image_url, image_id, published_at, created_at";

pub struct NewsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recently published first
    pub async fn list(&self) -> Result<Vec<News>> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM news ORDER BY published_at DESC");

        let news = sqlx::query_as::<_, News>(&sql).fetch_all(self.pool).await?;

        Ok(news)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<News> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM news WHERE news_id = $1");

        let news = sqlx::query_as::<_, News>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(news)
    }

    pub async fn create(&self, req: &CreateNewsRequest, image: Option<&ImageRef>) -> Result<News> {
        let sql = format!(
            r#"
            INSERT INTO news (title, content, image_url, image_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {NEWS_COLUMNS}
            "#
        );

        let news = sqlx::query_as::<_, News>(&sql)
            .bind(&req.title)
            .bind(&req.content)
            .bind(image.map(|i| &i.url))
            .bind(image.map(|i| &i.id))
            .fetch_one(self.pool)
            .await?;

        Ok(news)
    }

    /// Merge the provided fields. Editing republishes the article.
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateNewsRequest,
        image: Option<&ImageRef>,
    ) -> Result<News> {
        let sql = format!(
            r#"
            UPDATE news
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_url = COALESCE($4, image_url),
                image_id = COALESCE($5, image_id),
                published_at = NOW()
            WHERE news_id = $1
            RETURNING {NEWS_COLUMNS}
            "#
        );

        let news = sqlx::query_as::<_, News>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(&req.content)
            .bind(image.map(|i| &i.url))
            .bind(image.map(|i| &i.id))
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(news)
    }

    /// Delete an article, returning the removed row
    pub async fn delete(&self, id: Uuid) -> Result<News> {
        let sql = format!("DELETE FROM news WHERE news_id = $1 RETURNING {NEWS_COLUMNS}");

        let news = sqlx::query_as::<_, News>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(news)
    }
}
