use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_non_negative;

/// Request payload for creating a game
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGameRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub category_id: Uuid,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: String,

    #[validate(length(min = 1, max = 64))]
    pub date: String,

    #[validate(length(min = 1, max = 64))]
    pub time: String,

    #[validate(length(min = 1, max = 255))]
    pub lead: String,

    #[validate(length(min = 1, max = 255))]
    pub co_lead: String,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Player limit must be at least 1"))]
    pub player_limit: i32,

    #[validate(length(min = 1, max = 255))]
    pub venue: String,
}

/// Request payload for updating a game
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateGameRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub date: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub time: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub lead: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub co_lead: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Option<Decimal>,

    #[validate(range(min = 1))]
    pub player_limit: Option<i32>,

    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,
}
