use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application::CreateApplicationRequest;
use crate::error::{Result, StorageError};
use crate::models::{Application, ApplicationStatus};

const APPLICATION_COLUMNS: &str = r#"
    application_id, name, roll_number, contact_number, email, post, subpost,
    category_interested_in, additional_details, status, created_at, updated_at
"#;

/// Repository for post applications
pub struct ApplicationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a new application. The status always starts as `Pending`.
    pub async fn create(&self, req: &CreateApplicationRequest) -> Result<Application> {
        let sql = format!(
            r#"
            INSERT INTO applications (
                name, roll_number, contact_number, email, post, subpost,
                category_interested_in, additional_details, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(&req.name)
            .bind(&req.roll_number)
            .bind(&req.phone)
            .bind(req.normalized_email())
            .bind(&req.position)
            .bind(req.subpost_or_default())
            .bind(req.category_interested_in)
            .bind(&req.additional_details)
            .bind(ApplicationStatus::Pending.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).on_foreign_key("Category of interest does not exist")
            })?;

        Ok(application)
    }

    /// All applications, newest first
    pub async fn list(&self) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY created_at DESC"
        );

        let applications = sqlx::query_as::<_, Application>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(applications)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Application> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE application_id = $1");

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(application)
    }

    /// Applications submitted with this email, case-insensitively, newest first
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE LOWER(email) = $1 ORDER BY created_at DESC"
        );

        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(email)
            .fetch_all(self.pool)
            .await?;

        Ok(applications)
    }

    /// Applications whose post is one of `posts`, newest first
    pub async fn list_by_posts(&self, posts: &[&str]) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE post = ANY($1) ORDER BY created_at DESC"
        );
        let posts: Vec<String> = posts.iter().map(|p| p.to_string()).collect();

        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(posts)
            .fetch_all(self.pool)
            .await?;

        Ok(applications)
    }

    pub async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let sql = format!(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE application_id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(application)
    }

    /// Delete an application, returning the removed row
    pub async fn delete(&self, id: Uuid) -> Result<Application> {
        let sql = format!(
            "DELETE FROM applications WHERE application_id = $1 RETURNING {APPLICATION_COLUMNS}"
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(application)
    }
}
