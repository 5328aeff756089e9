use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::announcement::{AnnouncementFilter, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    dto::common::{MessageResponse, StatusMessage, SuccessResponse},
    models::Announcement,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AppJson, AppPath, AppQuery};
use crate::error::{ErrorBody, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/announcements",
    params(AnnouncementFilter),
    responses(
        (status = 200, description = "Announcements newest first, wrapped as { success, data }", body = Vec<Announcement>),
        (status = 400, description = "Unknown audience", body = ErrorBody)
    ),
    tag = "announcements"
)]
pub async fn list_announcements(
    State(db): State<Database>,
    AppQuery(filter): AppQuery<AnnouncementFilter>,
) -> Result<Response, WebError> {
    filter.validate()?;

    let announcements = services::list_announcements(db.pool(), &filter).await?;

    Ok(Json(SuccessResponse::new(announcements)).into_response())
}

#[utoipa::path(
    get,
    path = "/announcements/{id}",
    params(
        ("id" = Uuid, Path, description = "Announcement id")
    ),
    responses(
        (status = 200, description = "Announcement, wrapped as { success, data }", body = Announcement),
        (status = 404, description = "Announcement not found", body = ErrorBody)
    ),
    tag = "announcements"
)]
pub async fn get_announcement(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let announcement = services::get_announcement(db.pool(), id).await?;

    Ok(Json(SuccessResponse::new(announcement)).into_response())
}

#[utoipa::path(
    post,
    path = "/announcements",
    request_body = CreateAnnouncementRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Announcement created, wrapped as { message, data }", body = Announcement),
        (status = 400, description = "Validation error", body = ErrorBody)
    ),
    tag = "announcements"
)]
pub async fn create_announcement(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateAnnouncementRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let announcement = services::create_announcement(db.pool(), &req).await?;
    tracing::info!(
        announcement_id = %announcement.announcement_id,
        audience = %announcement.audience,
        "Announcement published"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Announcement created successfully", announcement)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/announcements/{id}",
    params(
        ("id" = Uuid, Path, description = "Announcement id")
    ),
    request_body = UpdateAnnouncementRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Announcement updated, wrapped as { message, data }", body = Announcement),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Announcement not found", body = ErrorBody)
    ),
    tag = "announcements"
)]
pub async fn update_announcement(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateAnnouncementRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let announcement = services::update_announcement(db.pool(), id, &req).await?;

    Ok(Json(MessageResponse::new("Announcement updated successfully", announcement)).into_response())
}

#[utoipa::path(
    delete,
    path = "/announcements/{id}",
    params(
        ("id" = Uuid, Path, description = "Announcement id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Announcement deleted", body = StatusMessage),
        (status = 404, description = "Announcement not found", body = ErrorBody)
    ),
    tag = "announcements"
)]
pub async fn delete_announcement(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_announcement(db.pool(), id).await?;

    Ok(Json(StatusMessage::ok("Announcement deleted successfully")).into_response())
}
