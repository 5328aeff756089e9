use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A registered player. Unique per (cnic, category, game).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub name: String,
    pub cnic: String,
    pub phone: String,
    pub email: Option<String>,
    pub ticket_price: Decimal,
    pub category_id: Uuid,
    pub game_id: Uuid,
    pub registered_at: chrono::NaiveDateTime,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Player joined with the titles of its category and game.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerWithRefs {
    pub player_id: Uuid,
    pub name: String,
    pub cnic: String,
    pub phone: String,
    pub email: Option<String>,
    pub ticket_price: Decimal,
    pub category_id: Uuid,
    pub category_title: String,
    pub game_id: Uuid,
    pub game_title: String,
    pub registered_at: chrono::NaiveDateTime,
}
