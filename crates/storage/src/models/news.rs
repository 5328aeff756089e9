use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct News {
    pub news_id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub image_id: Option<String>,
    pub published_at: chrono::NaiveDateTime,
    pub created_at: chrono::NaiveDateTime,
}
