use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Judge, JudgeAssignment};

/// Request payload for creating a judge together with its login account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJudgeRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, max = 32, message = "Contact is required"))]
    pub contact: String,

    #[serde(default)]
    #[validate(length(max = 1, message = "A judge can only be assigned to one game"))]
    pub assigned_games: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateJudgeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 32))]
    pub contact: Option<String>,

    /// Replaces the assignment when present; an empty list clears it.
    #[validate(length(max = 1, message = "A judge can only be assigned to one game"))]
    pub assigned_games: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgeResponse {
    #[serde(flatten)]
    pub judge: Judge,
    pub assignments: Vec<JudgeAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnnounceResultRequest {
    #[validate(length(min = 1, max = 255, message = "Winner is required"))]
    pub winner: String,

    #[validate(length(min = 1, max = 255, message = "Runner-up is required"))]
    pub runner_up: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_limited_to_one_game() {
        let req = CreateJudgeRequest {
            name: "Dr. Saima".into(),
            email: "saima@example.edu".into(),
            contact: "03111234567".into(),
            assigned_games: vec![Uuid::new_v4(), Uuid::new_v4()],
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("assigned_games"));
    }
}
