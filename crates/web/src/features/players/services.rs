use importer::{ImportSummary, PgPlayerStore, PlayerImporter};
use sqlx::PgPool;
use storage::{
    dto::common::PaginatedResponse,
    dto::player::{CreatePlayerRequest, PlayerFilter},
    error::Result,
    models::{Player, PlayerWithRefs},
    repository::PlayerRepository,
};

pub async fn create_player(pool: &PgPool, req: &CreatePlayerRequest) -> Result<Player> {
    PlayerRepository::new(pool).create(req).await
}

pub async fn list_players(
    pool: &PgPool,
    filter: &PlayerFilter,
) -> Result<PaginatedResponse<PlayerWithRefs>> {
    let (players, total_items) = PlayerRepository::new(pool).list(filter).await?;

    Ok(PaginatedResponse::new(
        players,
        filter.page,
        filter.page_size,
        total_items,
    ))
}

/// Import a CSV upload. Rows naming unknown categories or games, and players
/// already registered, are skipped.
pub async fn import_players(pool: &PgPool, csv: &[u8]) -> importer::Result<ImportSummary> {
    let store = PgPlayerStore::new(pool);
    PlayerImporter::new(&store).import_csv(csv).await
}
