use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{MessageResponse, StatusMessage, SuccessResponse},
    dto::game::{CreateGameRequest, UpdateGameRequest},
    models::Game,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AppJson, AppPath};
use crate::error::{ErrorBody, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/games",
    responses(
        (status = 200, description = "All games, wrapped as { success, data }", body = Vec<Game>)
    ),
    tag = "games"
)]
pub async fn list_games(State(db): State<Database>) -> Result<Response, WebError> {
    let games = services::list_games(db.pool()).await?;

    Ok(Json(SuccessResponse::new(games)).into_response())
}

#[utoipa::path(
    get,
    path = "/games/{id}",
    params(
        ("id" = Uuid, Path, description = "Game id")
    ),
    responses(
        (status = 200, description = "Game, wrapped as { success, data }", body = Game),
        (status = 404, description = "Game not found", body = ErrorBody)
    ),
    tag = "games"
)]
pub async fn get_game(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let game = services::get_game(db.pool(), id).await?;

    Ok(Json(SuccessResponse::new(game)).into_response())
}

#[utoipa::path(
    post,
    path = "/games",
    request_body = CreateGameRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Game created, wrapped as { message, data }", body = Game),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "games"
)]
pub async fn create_game(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateGameRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::create_game(db.pool(), &req).await?;
    tracing::info!(game_id = %game.game_id, title = %game.title, "Game created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Game created successfully", game)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/games/{id}",
    params(
        ("id" = Uuid, Path, description = "Game id")
    ),
    request_body = UpdateGameRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Game updated, wrapped as { message, data }", body = Game),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Game or category not found", body = ErrorBody)
    ),
    tag = "games"
)]
pub async fn update_game(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateGameRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::update_game(db.pool(), id, &req).await?;

    Ok(Json(MessageResponse::new("Game updated successfully", game)).into_response())
}

#[utoipa::path(
    delete,
    path = "/games/{id}",
    params(
        ("id" = Uuid, Path, description = "Game id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Game deleted", body = StatusMessage),
        (status = 404, description = "Game not found", body = ErrorBody)
    ),
    tag = "games"
)]
pub async fn delete_game(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_game(db.pool(), id).await?;

    Ok(Json(StatusMessage::ok("Game deleted successfully")).into_response())
}
