use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

use super::common::{non_blank, normalize_email};
use crate::models::Application;

/// Posts whose leads and co-leads run the games.
pub const GAME_POSTS: &[&str] = &["E-Games", "Geek Games", "General Games"];

pub const DEFAULT_SUBPOST: &str = "Lead";

/// Request payload for applying for a post
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Roll number is required"))]
    pub roll_number: String,

    #[validate(length(min = 7, max = 32, message = "Phone must be between 7 and 32 characters"))]
    pub phone: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Position is required"))]
    pub position: String,

    #[validate(custom(function = "validate_subpost"))]
    pub subpost: Option<String>,

    pub category_interested_in: Option<Uuid>,

    #[validate(length(max = 2000))]
    pub additional_details: Option<String>,
}

impl CreateApplicationRequest {
    pub fn subpost_or_default(&self) -> &str {
        self.subpost.as_deref().unwrap_or(DEFAULT_SUBPOST)
    }

    /// The email as stored: trimmed, lowercased, blank dropped.
    pub fn normalized_email(&self) -> Option<String> {
        non_blank(self.email.clone()).map(|email| normalize_email(&email))
    }
}

/// Request payload for reviewing an application.
///
/// `status` is kept as free text so an unknown value surfaces as a
/// 400 "invalid status" rather than a body deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewApplicationRequest {
    #[schema(example = "Accepted")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct ApplicationLookupQuery {
    pub email: Option<String>,
}

impl ApplicationLookupQuery {
    /// The trimmed, lowercased email, or a message describing why it is unusable.
    pub fn normalized_email(&self) -> Result<String, &'static str> {
        let email = non_blank(self.email.clone()).ok_or("email query parameter is required")?;

        if !email.validate_email() {
            return Err("email query parameter is not a valid address");
        }

        Ok(normalize_email(&email))
    }
}

/// Game-post applications grouped by subpost.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GamePostHolders {
    pub lead: Vec<Application>,
    pub co_lead: Vec<Application>,
}

fn validate_subpost(subpost: &str) -> Result<(), validator::ValidationError> {
    const VALID_SUBPOSTS: &[&str] = &["Lead", "Co-Lead"];

    if VALID_SUBPOSTS.contains(&subpost) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_subpost"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateApplicationRequest {
        CreateApplicationRequest {
            name: "Ayesha Khan".into(),
            roll_number: "BSCS-21-014".into(),
            phone: "03001234567".into(),
            email: Some("ayesha@example.edu".into()),
            position: "E-Games".into(),
            subpost: None,
            category_interested_in: None,
            additional_details: None,
        }
    }

    #[test]
    fn test_valid_application() {
        assert!(request().validate().is_ok());
        assert_eq!(request().subpost_or_default(), "Lead");
    }

    #[test]
    fn test_rejects_unknown_subpost() {
        let mut req = request();
        req.subpost = Some("Captain".into());
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("subpost"));
    }

    #[test]
    fn test_stored_email_is_lowercased() {
        let mut req = request();
        req.email = Some(" Ayesha@Example.EDU ".into());
        assert_eq!(req.normalized_email().as_deref(), Some("ayesha@example.edu"));

        req.email = Some("   ".into());
        assert_eq!(req.normalized_email(), None);
    }

    #[test]
    fn test_rejects_bad_email() {
        let mut req = request();
        req.email = Some("not-an-email".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_lookup_query_email() {
        let query = ApplicationLookupQuery {
            email: Some("  ayesha@example.edu ".into()),
        };
        assert_eq!(query.normalized_email().unwrap(), "ayesha@example.edu");

        let mixed_case = ApplicationLookupQuery {
            email: Some("Ayesha@Example.EDU".into()),
        };
        assert_eq!(mixed_case.normalized_email().unwrap(), "ayesha@example.edu");

        let missing = ApplicationLookupQuery { email: None };
        assert!(missing.normalized_email().is_err());

        let malformed = ApplicationLookupQuery {
            email: Some("ayesha".into()),
        };
        assert!(malformed.normalized_email().is_err());
    }
}
