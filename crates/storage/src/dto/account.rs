use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Account, AccountRole};

/// Request payload for registering a password account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 30,
        message = "Name must be between 3 and 30 characters"
    ))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[validate(custom(function = "validate_registrable_role"))]
    pub role: Option<String>,

    #[validate(length(min = 13, max = 15, message = "CNIC must be 13 to 15 characters"))]
    pub cnic: String,
}

impl RegisterRequest {
    pub fn role_or_default(&self) -> AccountRole {
        self.role
            .as_deref()
            .and_then(AccountRole::parse)
            .unwrap_or(AccountRole::User)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Google ID token obtained by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token_id: String,
}

/// Fields for an account created on first Google sign-in.
#[derive(Debug, Clone)]
pub struct NewExternalAccount {
    pub name: String,
    pub email: String,
    pub google_id: String,
}

/// Fields for a password account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub cnic: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthPayload {
    pub user: Account,
    pub token: String,
}

fn validate_registrable_role(role: &str) -> Result<(), validator::ValidationError> {
    match AccountRole::parse(role) {
        Some(AccountRole::Participant) | None => {
            Err(validator::ValidationError::new("invalid_role"))
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Hamza".into(),
            email: "hamza@example.edu".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            role: None,
            cnic: "3520212345671".into(),
        }
    }

    #[test]
    fn test_valid_registration_defaults_to_user() {
        let req = request();
        assert!(req.validate().is_ok());
        assert_eq!(req.role_or_default(), AccountRole::User);
    }

    #[test]
    fn test_password_confirmation_must_match() {
        let mut req = request();
        req.confirm_password = "different".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_participant_role_is_not_registrable() {
        let mut req = request();
        req.role = Some("isParticipant".into());
        assert!(req.validate().is_err());

        req.role = Some("coLead".into());
        assert!(req.validate().is_ok());
        assert_eq!(req.role_or_default(), AccountRole::CoLead);
    }

    #[test]
    fn test_cnic_length() {
        let mut req = request();
        req.cnic = "12345".into();
        assert!(req.validate().is_err());
    }
}
