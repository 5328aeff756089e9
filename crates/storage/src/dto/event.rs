use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_EVENT_CATEGORY: &str = "ticketing";
pub const DEFAULT_EVENT_STATUS: &str = "active";

/// Request payload for creating an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(min = 1, max = 64, message = "Start date is required"))]
    pub start_date: String,

    #[validate(custom(function = "validate_event_category"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Subcategory is required"))]
    pub subcategory: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_event_status"))]
    pub status: Option<String>,

    #[validate(length(max = 64))]
    pub ticket_price: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    #[validate(length(max = 64))]
    pub registration_deadline: Option<String>,

    pub location_details: Option<String>,
}

/// Request payload for updating an event
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub start_date: Option<String>,

    #[validate(custom(function = "validate_event_category"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub subcategory: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_event_status"))]
    pub status: Option<String>,

    #[validate(length(max = 64))]
    pub ticket_price: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    #[validate(length(max = 64))]
    pub registration_deadline: Option<String>,

    pub location_details: Option<String>,
}

fn validate_event_category(category: &str) -> Result<(), validator::ValidationError> {
    const VALID_CATEGORIES: &[&str] = &["ticketing", "nonticketing"];

    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_category"))
    }
}

fn validate_event_status(status: &str) -> Result<(), validator::ValidationError> {
    const VALID_STATUSES: &[&str] = &["active", "inactive", "complete", "draft"];

    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_status_must_be_known() {
        let req = UpdateEventRequest {
            status: Some("cancelled".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateEventRequest {
            status: Some("complete".into()),
            category: Some("nonticketing".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
