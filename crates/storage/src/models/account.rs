use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    /// Absent for accounts created through Google sign-in.
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub role: String,
    pub is_participant: bool,
    pub cnic: Option<String>,
    pub google_id: Option<String>,
    pub position: Option<String>,
    pub subpost: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Roles an account can hold. Stored as text in `accounts.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    User,
    Lead,
    CoLead,
    Admin,
    Judge,
    Participant,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Lead => "lead",
            Self::CoLead => "coLead",
            Self::Admin => "admin",
            Self::Judge => "judge",
            Self::Participant => "isParticipant",
        }
    }

    pub fn parse(role: &str) -> Option<Self> {
        [
            Self::User,
            Self::Lead,
            Self::CoLead,
            Self::Admin,
            Self::Judge,
            Self::Participant,
        ]
        .into_iter()
        .find(|r| r.as_str() == role)
    }
}

impl Account {
    pub fn has_role(&self, role: AccountRole) -> bool {
        self.role == role.as_str()
    }
}
