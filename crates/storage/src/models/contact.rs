use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContactMessage {
    pub message_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub subject: String,
    pub message: String,
    pub account_id: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
}
