use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Judge {
    pub judge_id: Uuid,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub account_id: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeAssignment {
    pub assignment_id: Uuid,
    pub judge_id: Uuid,
    pub game_id: Uuid,
    pub status: String,
    pub winner: Option<String>,
    pub runner_up: Option<String>,
    pub announced_at: Option<chrono::NaiveDateTime>,
}

/// Assignment joined with the game it refers to, as shown on the judge panel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeAssignmentDetail {
    pub assignment_id: Uuid,
    pub game_id: Uuid,
    pub game_title: String,
    pub game_date: String,
    pub game_time: String,
    pub venue: String,
    pub status: String,
    pub winner: Option<String>,
    pub runner_up: Option<String>,
    pub announced_at: Option<chrono::NaiveDateTime>,
}
