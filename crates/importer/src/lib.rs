pub mod error;
pub mod parser;
pub mod players;
pub mod store;
pub mod traits;

pub use error::{ImporterError, Result};
pub use parser::{PlayerRow, parse_players};
pub use players::{ImportSummary, PlayerImporter};
pub use store::PgPlayerStore;
pub use traits::PlayerImportStore;
