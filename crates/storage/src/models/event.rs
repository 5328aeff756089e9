use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub title: String,
    pub start_date: String,
    pub category: String,
    pub subcategory: String,
    pub description: Option<String>,
    pub status: String,
    pub ticket_price: Option<String>,
    pub image_url: Option<String>,
    pub registration_deadline: Option<String>,
    pub location_details: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
