use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    /// The payload is malformed. Raised before any row is written.
    #[error("Failed to parse player file: {0}")]
    ParseError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),
}

impl From<csv::Error> for ImporterError {
    fn from(e: csv::Error) -> Self {
        ImporterError::ParseError(e.to_string())
    }
}
