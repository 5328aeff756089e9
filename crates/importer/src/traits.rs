use async_trait::async_trait;
use storage::dto::player::{CreatePlayerRequest, PlayerKey};
use storage::error::Result;
use uuid::Uuid;

/// Lookups and writes the player import runs against.
#[async_trait]
pub trait PlayerImportStore: Send + Sync {
    /// Case-insensitive exact title match.
    async fn find_category_id(&self, title: &str) -> Result<Option<Uuid>>;

    /// Case-insensitive exact title match scoped to one category.
    async fn find_game_id(&self, category_id: Uuid, title: &str) -> Result<Option<Uuid>>;

    async fn player_exists(&self, key: &PlayerKey) -> Result<bool>;

    /// A duplicate (cnic, category, game) surfaces as an error for which
    /// `StorageError::is_conflict` holds.
    async fn insert_player(&self, player: &CreatePlayerRequest) -> Result<()>;
}
