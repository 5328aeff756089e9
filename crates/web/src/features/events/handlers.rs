use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{MessageResponse, StatusMessage, SuccessResponse},
    dto::event::{CreateEventRequest, UpdateEventRequest},
    models::Event,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AppJson, AppPath};
use crate::error::{ErrorBody, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "All events, wrapped as { success, data }", body = Vec<Event>)
    ),
    tag = "events"
)]
pub async fn list_events(State(db): State<Database>) -> Result<Response, WebError> {
    let events = services::list_events(db.pool()).await?;

    Ok(Json(SuccessResponse::new(events)).into_response())
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event, wrapped as { success, data }", body = Event),
        (status = 404, description = "Event not found", body = ErrorBody)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let event = services::get_event(db.pool(), id).await?;

    Ok(Json(SuccessResponse::new(event)).into_response())
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created, wrapped as { message, data }", body = Event),
        (status = 400, description = "Validation error", body = ErrorBody)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::create_event(db.pool(), &req).await?;
    tracing::info!(event_id = %event.event_id, title = %event.title, "Event created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Event created successfully", event)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated, wrapped as { message, data }", body = Event),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Event not found", body = ErrorBody)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::update_event(db.pool(), id, &req).await?;

    Ok(Json(MessageResponse::new("Event updated successfully", event)).into_response())
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event deleted", body = StatusMessage),
        (status = 404, description = "Event not found", body = ErrorBody)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_event(db.pool(), id).await?;

    Ok(Json(StatusMessage::ok("Event deleted successfully")).into_response())
}
