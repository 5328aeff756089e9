use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{MessageResponse, PaginatedResponse},
    dto::player::{CreatePlayerRequest, ImportPlayersResponse, PlayerFilter},
    models::{Player, PlayerWithRefs},
};
use validator::Validate;

use crate::extract::{AppJson, AppQuery};
use crate::error::{ErrorBody, WebError};
use crate::multipart::MultipartForm;

use super::services;

const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/players",
    request_body = CreatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Player registered, wrapped as { message, data }", body = Player),
        (status = 400, description = "Validation error or unknown category/game", body = ErrorBody),
        (status = 409, description = "Player already registered for this game", body = ErrorBody)
    ),
    tag = "players"
)]
pub async fn create_player(
    State(db): State<Database>,
    AppJson(req): AppJson<CreatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::create_player(db.pool(), &req).await?;
    tracing::info!(player_id = %player.player_id, game_id = %player.game_id, "Player registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Player registered successfully", player)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/players",
    params(PlayerFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Players with category and game titles", body = PaginatedResponse<PlayerWithRefs>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    tag = "players"
)]
pub async fn list_players(
    State(db): State<Database>,
    AppQuery(filter): AppQuery<PlayerFilter>,
) -> Result<Response, WebError> {
    filter.pagination().validate().map_err(WebError::BadRequest)?;

    let players = services::list_players(db.pool(), &filter).await?;

    Ok(Json(players).into_response())
}

#[utoipa::path(
    post,
    path = "/players/import",
    request_body(content = String, content_type = "multipart/form-data",
        description = "CSV upload in the `file` field with columns name, cnic, phone, email, ticketPrice, category, game"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Rows imported", body = ImportPlayersResponse),
        (status = 400, description = "Missing or malformed file", body = ErrorBody)
    ),
    tag = "players"
)]
pub async fn import_players(
    State(db): State<Database>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = MultipartForm::read(multipart, &[FILE_FIELD]).await?;
    let file = form
        .take_file(FILE_FIELD)
        .ok_or_else(|| WebError::BadRequest("No file uploaded".to_string()))?;

    let summary = services::import_players(db.pool(), &file.bytes).await?;

    Ok((
        StatusCode::CREATED,
        Json(ImportPlayersResponse {
            message: "Players imported successfully".to_string(),
            count: summary.inserted,
        }),
    )
        .into_response())
}
