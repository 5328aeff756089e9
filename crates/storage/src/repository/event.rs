use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::event::{
    CreateEventRequest, DEFAULT_EVENT_CATEGORY, DEFAULT_EVENT_STATUS, UpdateEventRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str = r#"
    event_id, title, start_date, category, subcategory, description, status,
    ticket_price, image_url, registration_deadline, location_details, created_at, updated_at
"#;

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC");

        let events = sqlx::query_as::<_, Event>(&sql).fetch_all(self.pool).await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1");

        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let sql = format!(
            r#"
            INSERT INTO events (
                title, start_date, category, subcategory, description, status,
                ticket_price, image_url, registration_deadline, location_details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(&req.title)
            .bind(&req.start_date)
            .bind(req.category.as_deref().unwrap_or(DEFAULT_EVENT_CATEGORY))
            .bind(&req.subcategory)
            .bind(&req.description)
            .bind(req.status.as_deref().unwrap_or(DEFAULT_EVENT_STATUS))
            .bind(&req.ticket_price)
            .bind(&req.image_url)
            .bind(&req.registration_deadline)
            .bind(&req.location_details)
            .fetch_one(self.pool)
            .await?;

        Ok(event)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateEventRequest) -> Result<Event> {
        let sql = format!(
            r#"
            UPDATE events
            SET
                title = COALESCE($2, title),
                start_date = COALESCE($3, start_date),
                category = COALESCE($4, category),
                subcategory = COALESCE($5, subcategory),
                description = COALESCE($6, description),
                status = COALESCE($7, status),
                ticket_price = COALESCE($8, ticket_price),
                image_url = COALESCE($9, image_url),
                registration_deadline = COALESCE($10, registration_deadline),
                location_details = COALESCE($11, location_details),
                updated_at = NOW()
            WHERE event_id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(&req.start_date)
            .bind(&req.category)
            .bind(&req.subcategory)
            .bind(&req.description)
            .bind(&req.status)
            .bind(&req.ticket_price)
            .bind(&req.image_url)
            .bind(&req.registration_deadline)
            .bind(&req.location_details)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
