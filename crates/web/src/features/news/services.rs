use sqlx::PgPool;
use storage::{
    dto::news::{CreateNewsRequest, UpdateNewsRequest},
    error::Result,
    models::News,
    repository::NewsRepository,
};
use uuid::Uuid;

use crate::blob::{self, UploadFile};
use crate::error::WebResult;
use crate::state::AppState;

pub const NEWS_FOLDER: &str = "news";

pub async fn list_news(pool: &PgPool) -> Result<Vec<News>> {
    NewsRepository::new(pool).list().await
}

pub async fn get_news(pool: &PgPool, id: Uuid) -> Result<News> {
    NewsRepository::new(pool).find_by_id(id).await
}

pub async fn create_news(
    state: &AppState,
    req: &CreateNewsRequest,
    image: Option<UploadFile>,
) -> WebResult<News> {
    let image = blob::upload_optional(state.blobs.as_ref(), image.as_ref(), NEWS_FOLDER).await?;
    let fresh: Vec<&str> = image.iter().map(|i| i.id.as_str()).collect();

    let news = blob::commit_uploads(
        state.blobs.as_ref(),
        &fresh,
        &[],
        NewsRepository::new(state.db.pool()).create(req, image.as_ref()),
    )
    .await?;

    Ok(news)
}

/// Merge the form into the article, swapping the image when a new one is sent
pub async fn update_news(
    state: &AppState,
    id: Uuid,
    req: &UpdateNewsRequest,
    image: Option<UploadFile>,
) -> WebResult<News> {
    let news = NewsRepository::new(state.db.pool());
    let existing = news.find_by_id(id).await?;

    let image = blob::upload_optional(state.blobs.as_ref(), image.as_ref(), NEWS_FOLDER).await?;
    let fresh: Vec<&str> = image.iter().map(|i| i.id.as_str()).collect();
    let replaced: Vec<&str> = if image.is_some() {
        existing.image_id.as_deref().into_iter().collect()
    } else {
        Vec::new()
    };

    let updated = blob::commit_uploads(
        state.blobs.as_ref(),
        &fresh,
        &replaced,
        news.update(id, req, image.as_ref()),
    )
    .await?;

    Ok(updated)
}

pub async fn delete_news(state: &AppState, id: Uuid) -> WebResult<News> {
    let news = NewsRepository::new(state.db.pool());
    let existing = news.find_by_id(id).await?;

    blob::release(state.blobs.as_ref(), existing.image_id.as_deref()).await;

    Ok(news.delete(id).await?)
}
