use async_trait::async_trait;
use sqlx::PgPool;
use storage::dto::player::{CreatePlayerRequest, PlayerKey};
use storage::error::Result;
use storage::repository::{CategoryRepository, GameRepository, PlayerRepository};
use uuid::Uuid;

use crate::traits::PlayerImportStore;

/// Postgres-backed import store built on the storage repositories.
pub struct PgPlayerStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgPlayerStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerImportStore for PgPlayerStore<'_> {
    async fn find_category_id(&self, title: &str) -> Result<Option<Uuid>> {
        let category = CategoryRepository::new(self.pool).find_by_title(title).await?;
        Ok(category.map(|c| c.category_id))
    }

    async fn find_game_id(&self, category_id: Uuid, title: &str) -> Result<Option<Uuid>> {
        let game = GameRepository::new(self.pool)
            .find_by_title(category_id, title)
            .await?;
        Ok(game.map(|g| g.game_id))
    }

    async fn player_exists(&self, key: &PlayerKey) -> Result<bool> {
        PlayerRepository::new(self.pool).exists(key).await
    }

    async fn insert_player(&self, player: &CreatePlayerRequest) -> Result<()> {
        PlayerRepository::new(self.pool).create(player).await?;
        Ok(())
    }
}
