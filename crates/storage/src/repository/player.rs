use sqlx::{PgPool, QueryBuilder};

use crate::dto::player::{CreatePlayerRequest, PlayerFilter, PlayerKey};
use crate::error::{Result, StorageError};
use crate::models::{Player, PlayerWithRefs};

const PLAYER_COLUMNS: &str = r#"
    player_id, name, cnic, phone, email, ticket_price, category_id, game_id,
    registered_at, created_at, updated_at
"#;

pub const DUPLICATE_PLAYER: &str = "Player is already registered for this game";

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a player. A second registration for the same (cnic, category, game) is a `Conflict`.
    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let sql = format!(
            r#"
            INSERT INTO players (name, cnic, phone, email, ticket_price, category_id, game_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PLAYER_COLUMNS}
            "#
        );

        let player = sqlx::query_as::<_, Player>(&sql)
            .bind(&req.name)
            .bind(&req.cnic)
            .bind(&req.phone)
            .bind(&req.email)
            .bind(req.ticket_price)
            .bind(req.category_id)
            .bind(req.game_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e)
                    .on_unique(DUPLICATE_PLAYER)
                    .on_foreign_key("Category or game does not exist")
            })?;

        Ok(player)
    }

    pub async fn exists(&self, key: &PlayerKey) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM players
                WHERE cnic = $1 AND category_id = $2 AND game_id = $3
            )
            "#,
        )
        .bind(&key.cnic)
        .bind(key.category_id)
        .bind(key.game_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Players with their category and game titles, newest registration first.
    /// Returns the requested page and the total number of matching players.
    pub async fn list(&self, filter: &PlayerFilter) -> Result<(Vec<PlayerWithRefs>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM players p WHERE 1=1");
        push_filter(&mut count, filter);

        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            r#"
            SELECT p.player_id, p.name, p.cnic, p.phone, p.email, p.ticket_price,
                   p.category_id, c.title AS category_title,
                   p.game_id, g.title AS game_title,
                   p.registered_at
            FROM players p
            INNER JOIN categories c ON c.category_id = p.category_id
            INNER JOIN games g ON g.game_id = p.game_id
            WHERE 1=1
            "#,
        );
        push_filter(&mut query, filter);

        query.push(" ORDER BY p.registered_at DESC LIMIT ");
        query.push_bind(pagination.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(pagination.offset() as i64);

        let players = query
            .build_query_as::<PlayerWithRefs>()
            .fetch_all(self.pool)
            .await?;

        Ok((players, total_items))
    }
}

fn push_filter(query: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &PlayerFilter) {
    if let Some(category_id) = filter.category_id {
        query.push(" AND p.category_id = ");
        query.push_bind(category_id);
    }

    if let Some(game_id) = filter.game_id {
        query.push(" AND p.game_id = ");
        query.push_bind(game_id);
    }
}
