use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::account::{NewAccount, NewExternalAccount};
use crate::error::{Result, StorageError};
use crate::models::{Account, AccountRole};

const ACCOUNT_COLUMNS: &str = r#"
    account_id, name, email, password_hash, role, is_participant, cnic,
    google_id, position, subpost, created_at, updated_at
"#;

pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a password account
    pub async fn create(&self, account: &NewAccount) -> Result<Account> {
        let sql = format!(
            r#"
            INSERT INTO accounts (name, email, password_hash, role, cnic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(&account.cnic)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_unique("Email or CNIC is already registered"))?;

        Ok(account)
    }

    /// Create a password-less `user` account on first Google sign-in
    pub async fn create_external(&self, account: &NewExternalAccount) -> Result<Account> {
        let sql = format!(
            r#"
            INSERT INTO accounts (name, email, google_id, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.google_id)
            .bind(AccountRole::User.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_unique("Email is already registered"))?;

        Ok(account)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Account> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_id = $1");

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    /// Exact, case-sensitive email match
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(account)
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE google_id = $1");

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(google_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(account)
    }

    /// Attach a Google identity to an existing account
    pub async fn link_google_id(&self, id: Uuid, google_id: &str) -> Result<Account> {
        let sql = format!(
            r#"
            UPDATE accounts SET google_id = $2, updated_at = NOW()
            WHERE account_id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(google_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_unique("Google account is already linked"))?
            .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    /// Mark the account as a participant holding `position` / `subpost`
    pub async fn promote_to_participant(
        &self,
        id: Uuid,
        position: &str,
        subpost: &str,
    ) -> Result<Account> {
        let sql = format!(
            r#"
            UPDATE accounts
            SET is_participant = TRUE, role = $2, position = $3, subpost = $4, updated_at = NOW()
            WHERE account_id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(AccountRole::Participant.as_str())
            .bind(position)
            .bind(subpost)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    /// Overwrite name and email, used to keep a judge's login in sync with its profile
    pub async fn update_identity(&self, id: Uuid, name: &str, email: &str) -> Result<Account> {
        let sql = format!(
            r#"
            UPDATE accounts SET name = $2, email = $3, updated_at = NOW()
            WHERE account_id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(name)
            .bind(email)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_unique("Email is already registered"))?
            .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
