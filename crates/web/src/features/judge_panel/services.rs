use sqlx::PgPool;
use storage::{
    dto::judge::AnnounceResultRequest,
    error::{Result, StorageError},
    models::{AccountRole, Judge, JudgeAssignment, JudgeAssignmentDetail},
    repository::JudgeRepository,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::middleware::auth::AuthUser;

/// The judge profile of a caller signed in with a `judge` account
pub async fn current_judge(pool: &PgPool, user: &AuthUser) -> WebResult<Judge> {
    user.require_role(AccountRole::Judge)?;

    JudgeRepository::new(pool)
        .find_by_account(user.account_id)
        .await?
        .ok_or_else(|| WebError::Forbidden("No judge profile is linked to this account".to_string()))
}

pub async fn assigned_games(pool: &PgPool, judge: &Judge) -> Result<Vec<JudgeAssignmentDetail>> {
    JudgeRepository::new(pool)
        .assignment_details(judge.judge_id)
        .await
}

pub async fn announce_result(
    pool: &PgPool,
    judge: &Judge,
    game_id: Uuid,
    req: &AnnounceResultRequest,
) -> WebResult<JudgeAssignment> {
    match JudgeRepository::new(pool)
        .announce_result(judge.judge_id, game_id, req)
        .await
    {
        Ok(assignment) => Ok(assignment),
        Err(StorageError::NotFound) => Err(WebError::NotFound(
            "Game is not assigned to this judge".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
