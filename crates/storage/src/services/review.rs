use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::best_effort;
use crate::dto::common::normalize_email;
use crate::error::{Result, StorageError};
use crate::models::{Account, Application, ApplicationStatus, ParseStatusError};
use crate::repository::{AccountRepository, ApplicationRepository};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persistence needed to change an application's status.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// `StorageError::NotFound` when no application has `id`.
    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application>;
}

/// Persistence needed to promote the applicant's account.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn promote(&self, account_id: Uuid, position: &str, subpost: &str) -> Result<Account>;
}

#[async_trait]
impl ApplicationStore for ApplicationRepository<'_> {
    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        self.update_status(id, status).await
    }
}

#[async_trait]
impl AccountStore for AccountRepository<'_> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        AccountRepository::find_by_email(self, email).await
    }

    async fn promote(&self, account_id: Uuid, position: &str, subpost: &str) -> Result<Account> {
        self.promote_to_participant(account_id, position, subpost)
            .await
    }
}

/// What happened to the applicant's account after the status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionOutcome {
    /// The new status was not `Accepted`.
    NotAttempted,
    Promoted { account_id: Uuid },
    /// The application carries no email to match on.
    NoEmail,
    NoAccount,
    /// The account lookup or update failed; the review itself still succeeded.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub application: Application,
    pub promotion: PromotionOutcome,
}

/// Set the status of an application and, on acceptance, promote the account
/// registered under the same email.
///
/// The status write is mandatory. The promotion is best-effort: a missing or
/// failing account never fails the review.
pub async fn review_application<A, U>(
    applications: &A,
    accounts: &U,
    id: Uuid,
    status: &str,
) -> std::result::Result<ReviewOutcome, ReviewError>
where
    A: ApplicationStore + ?Sized,
    U: AccountStore + ?Sized,
{
    let status: ApplicationStatus = status.parse()?;

    let application = applications.set_status(id, status).await?;
    info!(application_id = %id, %status, "Application reviewed");

    let promotion = if status == ApplicationStatus::Accepted {
        best_effort("promote applicant account", promote_applicant(accounts, &application))
            .await
            .unwrap_or(PromotionOutcome::Failed)
    } else {
        PromotionOutcome::NotAttempted
    };

    Ok(ReviewOutcome {
        application,
        promotion,
    })
}

async fn promote_applicant<U>(accounts: &U, application: &Application) -> Result<PromotionOutcome>
where
    U: AccountStore + ?Sized,
{
    let Some(email) = application.email.as_deref() else {
        warn!(application_id = %application.application_id, "Accepted application has no email, skipping promotion");
        return Ok(PromotionOutcome::NoEmail);
    };

    let email = normalize_email(email);
    let Some(account) = accounts.find_by_email(&email).await? else {
        warn!(application_id = %application.application_id, %email, "No account matches accepted application");
        return Ok(PromotionOutcome::NoAccount);
    };

    let account = accounts
        .promote(account.account_id, &application.post, &application.subpost)
        .await?;
    info!(account_id = %account.account_id, post = %application.post, "Account promoted to participant");

    Ok(PromotionOutcome::Promoted {
        account_id: account.account_id,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::models::AccountRole;

    #[derive(Default)]
    struct MemoryApplications {
        rows: Mutex<HashMap<Uuid, Application>>,
    }

    impl MemoryApplications {
        fn with(application: Application) -> Self {
            let store = Self::default();
            store
                .rows
                .lock()
                .unwrap()
                .insert(application.application_id, application);
            store
        }

        fn status_of(&self, id: Uuid) -> String {
            self.rows.lock().unwrap()[&id].status.clone()
        }
    }

    #[async_trait]
    impl ApplicationStore for MemoryApplications {
        async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(&id).ok_or(StorageError::NotFound)?;
            row.status = status.to_string();
            Ok(row.clone())
        }
    }

    #[derive(Default)]
    struct MemoryAccounts {
        rows: Mutex<Vec<Account>>,
        fail_writes: bool,
    }

    impl MemoryAccounts {
        fn with(account: Account) -> Self {
            Self {
                rows: Mutex::new(vec![account]),
                fail_writes: false,
            }
        }

        fn get(&self, email: &str) -> Account {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.email == email)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl AccountStore for MemoryAccounts {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.email == email)
                .cloned())
        }

        async fn promote(&self, account_id: Uuid, position: &str, subpost: &str) -> Result<Account> {
            if self.fail_writes {
                return Err(StorageError::ConstraintViolation("write rejected".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            let account = rows
                .iter_mut()
                .find(|a| a.account_id == account_id)
                .ok_or(StorageError::NotFound)?;
            account.is_participant = true;
            account.role = AccountRole::Participant.as_str().to_string();
            account.position = Some(position.to_string());
            account.subpost = Some(subpost.to_string());
            Ok(account.clone())
        }
    }

    fn application(email: Option<&str>) -> Application {
        let now = Utc::now().naive_utc();
        Application {
            application_id: Uuid::new_v4(),
            name: "Ayesha Khan".into(),
            roll_number: "BSCS-21-014".into(),
            contact_number: "03001234567".into(),
            email: email.map(str::to_string),
            post: "E-Games".into(),
            subpost: "Co-Lead".into(),
            category_interested_in: None,
            additional_details: None,
            status: "Pending".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn account(email: &str) -> Account {
        let now = Utc::now().naive_utc();
        Account {
            account_id: Uuid::new_v4(),
            name: "Ayesha Khan".into(),
            email: email.into(),
            password_hash: Some("hash".into()),
            role: "user".into(),
            is_participant: false,
            cnic: None,
            google_id: None,
            position: None,
            subpost: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_accept_promotes_matching_account() {
        let app = application(Some("ayesha@example.edu"));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::with(account("ayesha@example.edu"));

        let outcome = review_application(&applications, &accounts, id, "Accepted")
            .await
            .unwrap();

        assert_eq!(outcome.application.status(), Some(ApplicationStatus::Accepted));
        assert!(matches!(outcome.promotion, PromotionOutcome::Promoted { .. }));

        let promoted = accounts.get("ayesha@example.edu");
        assert!(promoted.is_participant);
        assert_eq!(promoted.role, "isParticipant");
        assert_eq!(promoted.position.as_deref(), Some("E-Games"));
        assert_eq!(promoted.subpost.as_deref(), Some("Co-Lead"));
    }

    #[tokio::test]
    async fn test_accept_matches_account_regardless_of_email_case() {
        let app = application(Some(" Ayesha@Example.EDU "));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::with(account("ayesha@example.edu"));

        let outcome = review_application(&applications, &accounts, id, "Accepted")
            .await
            .unwrap();

        assert!(matches!(outcome.promotion, PromotionOutcome::Promoted { .. }));
        assert!(accounts.get("ayesha@example.edu").is_participant);
    }

    #[tokio::test]
    async fn test_accept_without_account_still_succeeds() {
        let app = application(Some("nobody@example.edu"));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::default();

        let outcome = review_application(&applications, &accounts, id, "Accepted")
            .await
            .unwrap();

        assert_eq!(outcome.application.status, "Accepted");
        assert_eq!(outcome.promotion, PromotionOutcome::NoAccount);
    }

    #[tokio::test]
    async fn test_accept_without_email_skips_promotion() {
        let app = application(None);
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::default();

        let outcome = review_application(&applications, &accounts, id, "Accepted")
            .await
            .unwrap();

        assert_eq!(outcome.promotion, PromotionOutcome::NoEmail);
    }

    #[tokio::test]
    async fn test_failed_promotion_does_not_fail_review() {
        let app = application(Some("ayesha@example.edu"));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts {
            fail_writes: true,
            ..MemoryAccounts::with(account("ayesha@example.edu"))
        };

        let outcome = review_application(&applications, &accounts, id, "Accepted")
            .await
            .unwrap();

        assert_eq!(outcome.application.status, "Accepted");
        assert_eq!(outcome.promotion, PromotionOutcome::Failed);
        assert!(!accounts.get("ayesha@example.edu").is_participant);
    }

    #[tokio::test]
    async fn test_invalid_status_leaves_record_unchanged() {
        let app = application(Some("ayesha@example.edu"));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::default();

        let err = review_application(&applications, &accounts, id, "bogus")
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::InvalidStatus(_)));
        assert_eq!(applications.status_of(id), "Pending");
    }

    #[tokio::test]
    async fn test_missing_application_is_not_found() {
        let applications = MemoryApplications::default();
        let accounts = MemoryAccounts::default();

        let err = review_application(&applications, &accounts, Uuid::new_v4(), "Accepted")
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::Storage(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_reject_does_not_touch_account() {
        let app = application(Some("ayesha@example.edu"));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::with(account("ayesha@example.edu"));

        let outcome = review_application(&applications, &accounts, id, "Rejected")
            .await
            .unwrap();

        assert_eq!(outcome.application.status, "Rejected");
        assert_eq!(outcome.promotion, PromotionOutcome::NotAttempted);
        assert_eq!(accounts.get("ayesha@example.edu").role, "user");
    }

    #[tokio::test]
    async fn test_transitions_are_permissive() {
        let app = application(Some("ayesha@example.edu"));
        let id = app.application_id;
        let applications = MemoryApplications::with(app);
        let accounts = MemoryAccounts::with(account("ayesha@example.edu"));

        for status in ["Rejected", "Pending", "Accepted", "Accepted"] {
            let outcome = review_application(&applications, &accounts, id, status)
                .await
                .unwrap();
            assert_eq!(outcome.application.status, status);
        }
        assert!(accounts.get("ayesha@example.edu").is_participant);
    }
}
