use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::MessageResponse,
    dto::contact::CreateContactRequest,
    models::ContactMessage,
};
use validator::Validate;

use crate::extract::AppJson;
use crate::error::{ErrorBody, WebError};

use super::services;

#[utoipa::path(
    post,
    path = "/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message saved, wrapped as { message, data }", body = ContactMessage),
        (status = 400, description = "Validation error", body = ErrorBody)
    ),
    tag = "contact"
)]
pub async fn submit_message(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateContactRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let message = services::submit_message(db.pool(), &req).await?;
    tracing::info!(message_id = %message.message_id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Message sent successfully", message)),
    )
        .into_response())
}
