use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// An application for a society post, reviewed by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Application {
    pub application_id: Uuid,
    pub name: String,
    pub roll_number: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub post: String,
    pub subpost: String,
    pub category_interested_in: Option<Uuid>,
    pub additional_details: Option<String>,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Review state of an [`Application`].
///
/// Transitions are permissive: any state may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [Self::Pending, Self::Accepted, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid status '{}', expected one of Accepted, Rejected, Pending",
            self.0
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for ApplicationStatus {
    type Err = ParseStatusError;

    // Exact match only: "accepted" is rejected just like any other unknown value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

impl Application {
    /// Parsed view of the stored status column.
    pub fn status(&self) -> Option<ApplicationStatus> {
        self.status.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!("Pending".parse(), Ok(ApplicationStatus::Pending));
        assert_eq!("Accepted".parse(), Ok(ApplicationStatus::Accepted));
        assert_eq!("Rejected".parse(), Ok(ApplicationStatus::Rejected));
    }

    #[test]
    fn test_parse_rejects_unknown_and_miscased() {
        assert!("bogus".parse::<ApplicationStatus>().is_err());
        assert!("accepted".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_display_matches_stored_form() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }
}
