use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// True for unique violations, whether raw or already rewritten by [`Self::on_unique`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict(_)) || self.is_unique_violation()
    }

    /// Rewrites unique violations into `Conflict` with a caller-facing message.
    pub(crate) fn on_unique(self, message: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::Conflict(message.to_string())
        } else {
            self
        }
    }

    /// Rewrites foreign key violations into `ConstraintViolation` with a caller-facing message.
    pub(crate) fn on_foreign_key(self, message: &str) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_leave_other_errors_alone() {
        let err = StorageError::NotFound.on_unique("taken");
        assert!(matches!(err, StorageError::NotFound));

        let err = StorageError::NotFound.on_foreign_key("missing");
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn test_conflict_detection() {
        assert!(StorageError::Conflict("Email already registered".into()).is_conflict());
        assert!(!StorageError::ConstraintViolation("x".into()).is_conflict());
        assert!(!StorageError::NotFound.is_conflict());
    }
}
