use sqlx::PgPool;

use crate::dto::contact::CreateContactRequest;
use crate::error::{Result, StorageError};
use crate::models::ContactMessage;

pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: &CreateContactRequest) -> Result<ContactMessage> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, department, subject, message, account_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING message_id, name, email, department, subject, message, account_id, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.department)
        .bind(&req.subject)
        .bind(&req.message)
        .bind(req.account_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_foreign_key("Account does not exist"))?;

        Ok(message)
    }
}
