use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::game::{CreateGameRequest, UpdateGameRequest};
use crate::error::{Result, StorageError};
use crate::models::Game;

const GAME_COLUMNS: &str = r#"
    game_id, title, category_id, description, image_url, date, time, lead,
    co_lead, price, player_limit, venue, created_at, updated_at
"#;

pub struct GameRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GameRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all games, newest first
    pub async fn list(&self) -> Result<Vec<Game>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games ORDER BY created_at DESC");

        let games = sqlx::query_as::<_, Game>(&sql).fetch_all(self.pool).await?;

        Ok(games)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Game> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = $1");

        let game = sqlx::query_as::<_, Game>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(game)
    }

    /// Case-insensitive exact title match within one category
    pub async fn find_by_title(&self, category_id: Uuid, title: &str) -> Result<Option<Game>> {
        let sql = format!(
            r#"
            SELECT {GAME_COLUMNS} FROM games
            WHERE category_id = $1 AND LOWER(title) = LOWER($2)
            ORDER BY created_at
            LIMIT 1
            "#
        );

        let game = sqlx::query_as::<_, Game>(&sql)
            .bind(category_id)
            .bind(title)
            .fetch_optional(self.pool)
            .await?;

        Ok(game)
    }

    pub async fn create(&self, req: &CreateGameRequest) -> Result<Game> {
        let sql = format!(
            r#"
            INSERT INTO games (
                title, category_id, description, image_url, date, time,
                lead, co_lead, price, player_limit, venue
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {GAME_COLUMNS}
            "#
        );

        let game = sqlx::query_as::<_, Game>(&sql)
            .bind(&req.title)
            .bind(req.category_id)
            .bind(&req.description)
            .bind(&req.image_url)
            .bind(&req.date)
            .bind(&req.time)
            .bind(&req.lead)
            .bind(&req.co_lead)
            .bind(req.price)
            .bind(req.player_limit)
            .bind(&req.venue)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key("Category does not exist"))?;

        Ok(game)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateGameRequest) -> Result<Game> {
        let sql = format!(
            r#"
            UPDATE games
            SET
                title = COALESCE($2, title),
                category_id = COALESCE($3, category_id),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url),
                date = COALESCE($6, date),
                time = COALESCE($7, time),
                lead = COALESCE($8, lead),
                co_lead = COALESCE($9, co_lead),
                price = COALESCE($10, price),
                player_limit = COALESCE($11, player_limit),
                venue = COALESCE($12, venue),
                updated_at = NOW()
            WHERE game_id = $1
            RETURNING {GAME_COLUMNS}
            "#
        );

        let game = sqlx::query_as::<_, Game>(&sql)
            .bind(id)
            .bind(&req.title)
            .bind(req.category_id)
            .bind(&req.description)
            .bind(&req.image_url)
            .bind(&req.date)
            .bind(&req.time)
            .bind(&req.lead)
            .bind(&req.co_lead)
            .bind(req.price)
            .bind(req.player_limit)
            .bind(&req.venue)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key("Category does not exist"))?
            .ok_or(StorageError::NotFound)?;

        Ok(game)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM games WHERE game_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
