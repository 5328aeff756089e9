use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::category::{CategoryImages, CreateCategoryRequest, UpdateCategoryRequest};
use crate::error::{Result, StorageError};
use crate::models::Category;

const CATEGORY_COLUMNS: &str = r#"
    category_id, title, description, card_image_url, card_image_id,
    banner_image_url, banner_image_id, lead_id, co_lead_id, created_at, updated_at
"#;

const LEAD_MISSING: &str = "Lead or co-lead application does not exist";

pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, newest first
    pub async fn list(&self) -> Result<Vec<Category>> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY created_at DESC");

        let categories = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE category_id = $1");

        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Case-insensitive exact title match. The oldest category wins when titles collide.
    pub async fn find_by_title(&self, title: &str) -> Result<Option<Category>> {
        let sql = format!(
            r#"
            SELECT {CATEGORY_COLUMNS} FROM categories
            WHERE LOWER(title) = LOWER($1)
            ORDER BY created_at
            LIMIT 1
            "#
        );

        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(title)
            .fetch_optional(self.pool)
            .await?;

        Ok(category)
    }

    pub async fn create(
        &self,
        req: &CreateCategoryRequest,
        images: &CategoryImages,
    ) -> Result<Category> {
        let sql = format!(
            r#"
            INSERT INTO categories (
                title, description, card_image_url, card_image_id,
                banner_image_url, banner_image_id, lead_id, co_lead_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(&req.title)
            .bind(&req.description)
            .bind(images.card.as_ref().map(|i| &i.url))
            .bind(images.card.as_ref().map(|i| &i.id))
            .bind(images.banner.as_ref().map(|i| &i.url))
            .bind(images.banner.as_ref().map(|i| &i.id))
            .bind(req.lead_id)
            .bind(req.co_lead_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key(LEAD_MISSING))?;

        Ok(category)
    }

    /// Merge the provided fields and images into the stored category
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateCategoryRequest,
        images: &CategoryImages,
    ) -> Result<Category> {
        let sql = format!(
            r#"
            UPDATE categories
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                card_image_url = COALESCE($4, card_image_url),
                card_image_id = COALESCE($5, card_image_id),
                banner_image_url = COALESCE($6, banner_image_url),
                banner_image_id = COALESCE($7, banner_image_id),
                lead_id = COALESCE($8, lead_id),
                co_lead_id = COALESCE($9, co_lead_id),
                updated_at = NOW()
            WHERE category_id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(&req.description)
            .bind(images.card.as_ref().map(|i| &i.url))
            .bind(images.card.as_ref().map(|i| &i.id))
            .bind(images.banner.as_ref().map(|i| &i.url))
            .bind(images.banner.as_ref().map(|i| &i.id))
            .bind(req.lead_id)
            .bind(req.co_lead_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key(LEAD_MISSING))?
            .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Delete a category, returning the removed row
    pub async fn delete(&self, id: Uuid) -> Result<Category> {
        let sql = format!(
            "DELETE FROM categories WHERE category_id = $1 RETURNING {CATEGORY_COLUMNS}"
        );

        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(category)
    }
}
