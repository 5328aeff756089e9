use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub card_image_url: Option<String>,
    pub card_image_id: Option<String>,
    pub banner_image_url: Option<String>,
    pub banner_image_id: Option<String>,
    pub lead_id: Option<Uuid>,
    pub co_lead_id: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
