use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_AUDIENCE: &str = "All";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncementRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "validate_audience"))]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_audience"))]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, Validate)]
pub struct AnnouncementFilter {
    #[validate(custom(function = "validate_audience"))]
    pub audience: Option<String>,
}

fn validate_audience(audience: &str) -> Result<(), validator::ValidationError> {
    const VALID_AUDIENCES: &[&str] = &["All", "Users", "Judges"];

    if VALID_AUDIENCES.contains(&audience) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_audience"))
    }
}
