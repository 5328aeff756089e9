use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::application::{
        ApplicationLookupQuery, CreateApplicationRequest, GamePostHolders,
        ReviewApplicationRequest,
    },
    dto::common::{MessageResponse, SuccessResponse},
    models::Application,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AppJson, AppPath, AppQuery};
use crate::error::{ErrorBody, WebError};

use super::services;

#[utoipa::path(
    post,
    path = "/smecpost",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted, wrapped as { message, data }", body = Application),
        (status = 400, description = "Validation error", body = ErrorBody)
    ),
    tag = "applications"
)]
pub async fn apply(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateApplicationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let application = services::create_application(db.pool(), &req).await?;
    tracing::info!(application_id = %application.application_id, post = %application.post, "Application submitted");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Application submitted successfully", application)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/smecpost",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All applications newest first, wrapped as { success, data }", body = Vec<Application>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody)
    ),
    tag = "applications"
)]
pub async fn list_applications(State(db): State<Database>) -> Result<Response, WebError> {
    let applications = services::list_applications(db.pool()).await?;

    Ok(Json(SuccessResponse::new(applications)).into_response())
}

#[utoipa::path(
    get,
    path = "/smecpost/application",
    params(ApplicationLookupQuery),
    responses(
        (status = 200, description = "Applications submitted with this email, wrapped as { success, data }", body = Vec<Application>),
        (status = 400, description = "Missing or malformed email", body = ErrorBody)
    ),
    tag = "applications"
)]
pub async fn applications_by_email(
    State(db): State<Database>,
    AppQuery(query): AppQuery<ApplicationLookupQuery>,
) -> Result<Response, WebError> {
    let email = query
        .normalized_email()
        .map_err(|msg| WebError::BadRequest(msg.to_string()))?;

    let applications = services::applications_by_email(db.pool(), &email).await?;

    Ok(Json(SuccessResponse::new(applications)).into_response())
}

#[utoipa::path(
    get,
    path = "/smecpost/leads",
    responses(
        (status = 200, description = "Game post leads and co-leads, wrapped as { success, data }", body = GamePostHolders)
    ),
    tag = "applications"
)]
pub async fn game_post_holders(State(db): State<Database>) -> Result<Response, WebError> {
    let holders = services::game_post_holders(db.pool()).await?;

    Ok(Json(SuccessResponse::new(holders)).into_response())
}

#[utoipa::path(
    put,
    path = "/smecpost/{id}",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = ReviewApplicationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status updated, wrapped as { message, data }", body = Application),
        (status = 400, description = "Invalid status", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    ),
    tag = "applications"
)]
pub async fn review_application(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<ReviewApplicationRequest>,
) -> Result<Response, WebError> {
    let outcome = services::review_application(db.pool(), id, &req.status).await?;
    tracing::debug!(application_id = %id, promotion = ?outcome.promotion, "Review finished");

    Ok(Json(MessageResponse::new(
        "Application status updated successfully",
        outcome.application,
    ))
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/smecpost/{id}",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Application deleted, wrapped as { message, data }", body = Application),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    ),
    tag = "applications"
)]
pub async fn delete_application(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let application = services::delete_application(db.pool(), id).await?;

    Ok(Json(MessageResponse::new("Application deleted successfully", application)).into_response())
}
