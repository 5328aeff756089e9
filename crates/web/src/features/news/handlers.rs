use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{MessageResponse, SuccessResponse},
    dto::news::{CreateNewsRequest, UpdateNewsRequest},
    models::News,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::AppPath;
use crate::error::{ErrorBody, WebError};
use crate::multipart::MultipartForm;
use crate::state::AppState;

use super::services;

const IMAGE_FIELD: &str = "image";

#[utoipa::path(
    get,
    path = "/news",
    responses(
        (status = 200, description = "News newest first, wrapped as { success, data }", body = Vec<News>)
    ),
    tag = "news"
)]
pub async fn list_news(State(db): State<Database>) -> Result<Response, WebError> {
    let news = services::list_news(db.pool()).await?;

    Ok(Json(SuccessResponse::new(news)).into_response())
}

#[utoipa::path(
    get,
    path = "/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News id")
    ),
    responses(
        (status = 200, description = "Article, wrapped as { success, data }", body = News),
        (status = 404, description = "Article not found", body = ErrorBody)
    ),
    tag = "news"
)]
pub async fn get_news(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let news = services::get_news(db.pool(), id).await?;

    Ok(Json(SuccessResponse::new(news)).into_response())
}

#[utoipa::path(
    post,
    path = "/news",
    request_body(content = CreateNewsRequest, content_type = "multipart/form-data",
        description = "title and content plus an optional image file"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Article published, wrapped as { message, data }", body = News),
        (status = 400, description = "Validation error or non-image upload", body = ErrorBody)
    ),
    tag = "news"
)]
pub async fn create_news(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = MultipartForm::read(multipart, &[IMAGE_FIELD]).await?;
    let req = CreateNewsRequest {
        title: form.text("title").unwrap_or_default(),
        content: form.text("content").unwrap_or_default(),
    };
    req.validate()?;
    let image = form.take_image(IMAGE_FIELD)?;

    let news = services::create_news(&state, &req, image).await?;
    tracing::info!(news_id = %news.news_id, "News published");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("News created successfully", news)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News id")
    ),
    request_body(content = UpdateNewsRequest, content_type = "multipart/form-data",
        description = "Fields to change plus an optional replacement image"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Article updated, wrapped as { message, data }", body = News),
        (status = 400, description = "Validation error or non-image upload", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody)
    ),
    tag = "news"
)]
pub async fn update_news(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = MultipartForm::read(multipart, &[IMAGE_FIELD]).await?;
    let req = UpdateNewsRequest {
        title: form.text("title"),
        content: form.text("content"),
    };
    req.validate()?;
    let image = form.take_image(IMAGE_FIELD)?;

    let news = services::update_news(&state, id, &req, image).await?;

    Ok(Json(MessageResponse::new("News updated successfully", news)).into_response())
}

#[utoipa::path(
    delete,
    path = "/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Article deleted, wrapped as { message, data }", body = News),
        (status = 404, description = "Article not found", body = ErrorBody)
    ),
    tag = "news"
)]
pub async fn delete_news(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let news = services::delete_news(&state, id).await?;

    Ok(Json(MessageResponse::new("News deleted successfully", news)).into_response())
}
