use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Game {
    pub game_id: Uuid,
    pub title: String,
    pub category_id: Uuid,
    pub description: String,
    pub image_url: String,
    pub date: String,
    pub time: String,
    pub lead: String,
    pub co_lead: String,
    pub price: Decimal,
    pub player_limit: i32,
    pub venue: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
