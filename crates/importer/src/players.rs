use std::collections::HashMap;

use storage::dto::player::CreatePlayerRequest;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::Result;
use crate::parser::{PlayerRow, parse_players};
use crate::traits::PlayerImportStore;

/// Per-batch tally. Only `inserted` is reported to API callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub unknown_category: usize,
    pub unknown_game: usize,
    pub duplicates: usize,
}

impl ImportSummary {
    pub fn skipped(&self) -> usize {
        self.unknown_category + self.unknown_game + self.duplicates
    }
}

/// Resolves player rows against existing categories and games and inserts the
/// ones that are not already registered.
pub struct PlayerImporter<'a, S: PlayerImportStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: PlayerImportStore + ?Sized> PlayerImporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Parse the whole payload, then import it. A malformed payload fails
    /// before the store is touched.
    pub async fn import_csv(&self, bytes: &[u8]) -> Result<ImportSummary> {
        let rows = parse_players(bytes)?;
        info!(rows = rows.len(), "Parsed player import file");
        self.import_rows(&rows).await
    }

    /// Import rows sequentially in file order. Unresolvable and duplicate rows
    /// are skipped; store failures other than a duplicate insert abort the batch.
    pub async fn import_rows(&self, rows: &[PlayerRow]) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut categories: HashMap<String, Option<Uuid>> = HashMap::new();
        let mut games: HashMap<(Uuid, String), Option<Uuid>> = HashMap::new();

        for row in rows {
            let category_title = row.category.trim();
            let category_key = category_title.to_lowercase();

            let category_id = match categories.get(&category_key) {
                Some(cached) => *cached,
                None => {
                    let found = self.store.find_category_id(category_title).await?;
                    categories.insert(category_key, found);
                    found
                }
            };

            let Some(category_id) = category_id else {
                warn!(row = row.row, category = category_title, "Skipping player: category not found");
                summary.unknown_category += 1;
                continue;
            };

            let game_title = row.game.trim();
            let game_key = (category_id, game_title.to_lowercase());

            let game_id = match games.get(&game_key) {
                Some(cached) => *cached,
                None => {
                    let found = self.store.find_game_id(category_id, game_title).await?;
                    games.insert(game_key, found);
                    found
                }
            };

            let Some(game_id) = game_id else {
                warn!(row = row.row, game = game_title, %category_id, "Skipping player: game not found in category");
                summary.unknown_game += 1;
                continue;
            };

            let player = CreatePlayerRequest {
                name: row.name.clone(),
                cnic: row.cnic.clone(),
                phone: row.phone.clone(),
                email: row.email.clone(),
                ticket_price: row.ticket_price,
                category_id,
                game_id,
            };

            if self.store.player_exists(&player.key()).await? {
                debug!(row = row.row, cnic = %row.cnic, "Skipping player: already registered");
                summary.duplicates += 1;
                continue;
            }

            match self.store.insert_player(&player).await {
                Ok(()) => summary.inserted += 1,
                Err(e) if e.is_conflict() => {
                    debug!(row = row.row, cnic = %row.cnic, "Skipping player: registered concurrently");
                    summary.duplicates += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            inserted = summary.inserted,
            skipped = summary.skipped(),
            "Player import finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use storage::dto::player::PlayerKey;
    use storage::error::{Result as StorageResult, StorageError};

    use super::*;
    use crate::ImporterError;

    struct MemoryStore {
        categories: Vec<(Uuid, String)>,
        games: Vec<(Uuid, Uuid, String)>,
        players: Mutex<Vec<CreatePlayerRequest>>,
        lookups: Mutex<usize>,
        /// cnic whose insert loses a race with another import
        racing_cnic: Option<String>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                categories: Vec::new(),
                games: Vec::new(),
                players: Mutex::new(Vec::new()),
                lookups: Mutex::new(0),
                racing_cnic: None,
            }
        }

        fn category(&mut self, title: &str) -> Uuid {
            let id = Uuid::new_v4();
            self.categories.push((id, title.to_string()));
            id
        }

        fn game(&mut self, category_id: Uuid, title: &str) -> Uuid {
            let id = Uuid::new_v4();
            self.games.push((id, category_id, title.to_string()));
            id
        }

        fn players(&self) -> Vec<CreatePlayerRequest> {
            self.players.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlayerImportStore for MemoryStore {
        async fn find_category_id(&self, title: &str) -> StorageResult<Option<Uuid>> {
            *self.lookups.lock().unwrap() += 1;
            Ok(self
                .categories
                .iter()
                .find(|(_, t)| t.to_lowercase() == title.to_lowercase())
                .map(|(id, _)| *id))
        }

        async fn find_game_id(&self, category_id: Uuid, title: &str) -> StorageResult<Option<Uuid>> {
            *self.lookups.lock().unwrap() += 1;
            Ok(self
                .games
                .iter()
                .find(|(_, c, t)| *c == category_id && t.to_lowercase() == title.to_lowercase())
                .map(|(id, _, _)| *id))
        }

        async fn player_exists(&self, key: &PlayerKey) -> StorageResult<bool> {
            Ok(self.players.lock().unwrap().iter().any(|p| p.key() == *key))
        }

        async fn insert_player(&self, player: &CreatePlayerRequest) -> StorageResult<()> {
            if self.racing_cnic.as_deref() == Some(player.cnic.as_str()) {
                return Err(StorageError::Conflict("already registered".into()));
            }
            self.players.lock().unwrap().push(player.clone());
            Ok(())
        }
    }

    const HEADER: &str = "name,cnic,phone,email,ticketPrice,category,game\n";

    #[tokio::test]
    async fn test_duplicate_rows_insert_once() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        let indoor = store.game(chess, "Indoor Games");

        let csv = format!(
            "{HEADER}Ali,12345,0300,,500,Chess,Indoor Games\nAli,12345,0300,,500,Chess,Indoor Games\n"
        );
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.duplicates, 1);

        let players = store.players();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].cnic, "12345");
        assert_eq!(players[0].category_id, chess);
        assert_eq!(players[0].game_id, indoor);
    }

    #[tokio::test]
    async fn test_unknown_category_is_skipped() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        store.game(chess, "Indoor Games");

        let csv = format!(
            "{HEADER}Ali,12345,0300,,500,Chess,Indoor Games\nSara,67890,0311,,500,Badminton,Indoor Games\n"
        );
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.unknown_category, 1);
        assert_eq!(store.players().len(), 1);
    }

    #[tokio::test]
    async fn test_game_is_scoped_to_its_category() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        let cricket = store.category("Cricket");
        store.game(cricket, "Indoor Games");

        let csv = format!("{HEADER}Ali,12345,0300,,500,Chess,Indoor Games\n");
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.unknown_game, 1);
        assert!(store.players().iter().all(|p| p.category_id != chess));
    }

    #[tokio::test]
    async fn test_names_match_case_insensitively() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        store.game(chess, "Indoor Games");

        let csv = format!("{HEADER}Ali,12345,0300,,500,  cHeSs ,INDOOR GAMES\n");
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
    }

    #[tokio::test]
    async fn test_same_cnic_in_another_game_is_inserted() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        store.game(chess, "Indoor Games");
        store.game(chess, "Blitz");

        let csv = format!(
            "{HEADER}Ali,12345,0300,,500,Chess,Indoor Games\nAli,12345,0300,,500,Chess,Blitz\n"
        );
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 2);
    }

    #[tokio::test]
    async fn test_lookups_are_cached_per_batch() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        store.game(chess, "Indoor Games");

        let csv = format!(
            "{HEADER}Ali,1,0300,,500,Chess,Indoor Games\nSara,2,0300,,500,chess,indoor games\nZain,3,0300,,500,Chess,Indoor Games\n"
        );
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 3);
        assert_eq!(*store.lookups.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_counts_as_skip() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        store.game(chess, "Indoor Games");
        store.racing_cnic = Some("12345".into());

        let csv = format!("{HEADER}Ali,12345,0300,,500,Chess,Indoor Games\n");
        let summary = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.duplicates, 1);
    }

    #[tokio::test]
    async fn test_malformed_file_inserts_nothing() {
        let mut store = MemoryStore::new();
        let chess = store.category("Chess");
        store.game(chess, "Indoor Games");

        let csv = format!(
            "{HEADER}Ali,12345,0300,,500,Chess,Indoor Games\nSara,67890,0311,,abc,Chess,Indoor Games\n"
        );
        let err = PlayerImporter::new(&store)
            .import_csv(csv.as_bytes())
            .await
            .unwrap_err();

        assert!(matches!(err, ImporterError::ParseError(_)));
        assert!(store.players().is_empty());
        assert_eq!(*store.lookups.lock().unwrap(), 0);
    }
}
