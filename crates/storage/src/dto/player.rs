use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationParams, validate_non_negative};

/// Request payload for registering a single player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "CNIC is required"))]
    pub cnic: String,

    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub ticket_price: Decimal,

    pub category_id: Uuid,

    pub game_id: Uuid,
}

/// The identity a player is deduplicated on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerKey {
    pub cnic: String,
    pub category_id: Uuid,
    pub game_id: Uuid,
}

impl CreatePlayerRequest {
    pub fn key(&self) -> PlayerKey {
        PlayerKey {
            cnic: self.cnic.clone(),
            category_id: self.category_id,
            game_id: self.game_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PlayerFilter {
    pub category_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    PaginationParams::default().page
}

fn default_page_size() -> u32 {
    PaginationParams::default().page_size
}

impl PlayerFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportPlayersResponse {
    pub message: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_negative_ticket_price_rejected() {
        let req = CreatePlayerRequest {
            name: "Ali".into(),
            cnic: "12345".into(),
            phone: "03001234567".into(),
            email: None,
            ticket_price: Decimal::from_str("-5").unwrap(),
            category_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ticket_price"));
    }
}
