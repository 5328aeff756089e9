use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{MessageResponse, SuccessResponse},
    dto::judge::{CreateJudgeRequest, JudgeResponse, UpdateJudgeRequest},
    models::Judge,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AppJson, AppPath};
use crate::error::{ErrorBody, WebError};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/judges",
    request_body = CreateJudgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Judge and login account created, wrapped as { message, data }", body = JudgeResponse),
        (status = 400, description = "Validation error or unknown game", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    ),
    tag = "judges"
)]
pub async fn create_judge(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateJudgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let judge = services::create_judge(&state, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Judge created successfully", judge)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/judges",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All judges with assignments, wrapped as { success, data }", body = Vec<JudgeResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    tag = "judges"
)]
pub async fn list_judges(State(db): State<Database>) -> Result<Response, WebError> {
    let judges = services::list_judges(db.pool()).await?;

    Ok(Json(SuccessResponse::new(judges)).into_response())
}

#[utoipa::path(
    get,
    path = "/judges/{id}",
    params(
        ("id" = Uuid, Path, description = "Judge id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Judge with assignments, wrapped as { success, data }", body = JudgeResponse),
        (status = 404, description = "Judge not found", body = ErrorBody)
    ),
    tag = "judges"
)]
pub async fn get_judge(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let judge = services::get_judge(db.pool(), id).await?;

    Ok(Json(SuccessResponse::new(judge)).into_response())
}

#[utoipa::path(
    put,
    path = "/judges/{id}",
    params(
        ("id" = Uuid, Path, description = "Judge id")
    ),
    request_body = UpdateJudgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Judge updated, wrapped as { message, data }", body = JudgeResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Judge not found", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    ),
    tag = "judges"
)]
pub async fn update_judge(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateJudgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let judge = services::update_judge(&state, id, &req).await?;

    Ok(Json(MessageResponse::new("Judge updated successfully", judge)).into_response())
}

#[utoipa::path(
    delete,
    path = "/judges/{id}",
    params(
        ("id" = Uuid, Path, description = "Judge id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Judge and account deleted, wrapped as { message, data }", body = Judge),
        (status = 404, description = "Judge not found", body = ErrorBody)
    ),
    tag = "judges"
)]
pub async fn delete_judge(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let judge = services::delete_judge(db.pool(), id).await?;
    tracing::info!(judge_id = %judge.judge_id, "Judge deleted");

    Ok(Json(MessageResponse::new("Judge deleted successfully", judge)).into_response())
}
