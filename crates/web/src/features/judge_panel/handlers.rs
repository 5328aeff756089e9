use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{MessageResponse, SuccessResponse},
    dto::judge::AnnounceResultRequest,
    models::{JudgeAssignment, JudgeAssignmentDetail},
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AppJson, AppPath};
use crate::error::{ErrorBody, WebError};
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/judge-panel/assigned-games",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's assignments with game details, wrapped as { success, data }", body = Vec<JudgeAssignmentDetail>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not a judge", body = ErrorBody)
    ),
    tag = "judge-panel"
)]
pub async fn assigned_games(
    State(db): State<Database>,
    user: AuthUser,
) -> Result<Response, WebError> {
    let judge = services::current_judge(db.pool(), &user).await?;
    let games = services::assigned_games(db.pool(), &judge).await?;

    Ok(Json(SuccessResponse::new(games)).into_response())
}

#[utoipa::path(
    post,
    path = "/judge-panel/results/{game_id}",
    params(
        ("game_id" = Uuid, Path, description = "Assigned game id")
    ),
    request_body = AnnounceResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result recorded, wrapped as { message, data }", body = JudgeAssignment),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 403, description = "Caller is not a judge", body = ErrorBody),
        (status = 404, description = "Game not assigned to the caller", body = ErrorBody)
    ),
    tag = "judge-panel"
)]
pub async fn announce_result(
    State(db): State<Database>,
    user: AuthUser,
    AppPath(game_id): AppPath<Uuid>,
    AppJson(req): AppJson<AnnounceResultRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let judge = services::current_judge(db.pool(), &user).await?;
    let assignment = services::announce_result(db.pool(), &judge, game_id, &req).await?;
    tracing::info!(judge_id = %judge.judge_id, game_id = %game_id, "Result announced");

    Ok(Json(MessageResponse::new("Result announced successfully", assignment)).into_response())
}
