use sqlx::PgPool;
use storage::{
    dto::game::{CreateGameRequest, UpdateGameRequest},
    error::{Result, StorageError},
    models::Game,
    repository::{CategoryRepository, GameRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_games(pool: &PgPool) -> Result<Vec<Game>> {
    GameRepository::new(pool).list().await
}

pub async fn get_game(pool: &PgPool, id: Uuid) -> Result<Game> {
    GameRepository::new(pool).find_by_id(id).await
}

/// Create a game under an existing category
pub async fn create_game(pool: &PgPool, req: &CreateGameRequest) -> WebResult<Game> {
    ensure_category(pool, req.category_id).await?;

    Ok(GameRepository::new(pool).create(req).await?)
}

pub async fn update_game(pool: &PgPool, id: Uuid, req: &UpdateGameRequest) -> WebResult<Game> {
    if let Some(category_id) = req.category_id {
        ensure_category(pool, category_id).await?;
    }

    Ok(GameRepository::new(pool).update(id, req).await?)
}

pub async fn delete_game(pool: &PgPool, id: Uuid) -> Result<()> {
    GameRepository::new(pool).delete(id).await
}

async fn ensure_category(pool: &PgPool, category_id: Uuid) -> WebResult<()> {
    match CategoryRepository::new(pool).find_by_id(category_id).await {
        Ok(_) => Ok(()),
        Err(StorageError::NotFound) => Err(WebError::NotFound("Category not found".to_string())),
        Err(e) => Err(e.into()),
    }
}
