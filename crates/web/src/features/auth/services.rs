use storage::{
    dto::account::{AuthPayload, LoginRequest, NewAccount, NewExternalAccount, RegisterRequest},
    dto::common::normalize_email,
    models::{Account, AccountRole},
    repository::{AccountRepository, JudgeRepository, RevokedTokenRepository},
    services::best_effort,
};
use uuid::Uuid;

use crate::auth::google::GoogleAuthError;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{WebError, WebResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Which accounts a login endpoint admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginScope {
    Any,
    JudgesOnly,
}

pub async fn register(state: &AppState, req: &RegisterRequest) -> WebResult<Account> {
    let password_hash = hash_password(&req.password)
        .map_err(|e| WebError::InternalServerError(format!("Password hashing failed: {e}")))?;

    let account = AccountRepository::new(state.db.pool())
        .create(&NewAccount {
            name: req.name.trim().to_string(),
            email: normalize_email(&req.email),
            password_hash,
            role: req.role_or_default(),
            cnic: Some(req.cnic.trim().to_string()),
        })
        .await?;

    Ok(account)
}

pub async fn login(state: &AppState, req: &LoginRequest, scope: LoginScope) -> WebResult<AuthPayload> {
    let pool = state.db.pool();
    let email = normalize_email(&req.email);

    let account = AccountRepository::new(pool)
        .find_by_email(&email)
        .await?
        .ok_or_else(|| WebError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    // Google-only accounts have no password to check against.
    let hash = account
        .password_hash
        .as_deref()
        .ok_or_else(|| WebError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let matches = verify_password(&req.password, hash)
        .map_err(|e| WebError::InternalServerError(format!("Stored password hash is unusable: {e}")))?;
    if !matches {
        return Err(WebError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let is_judge = account.has_role(AccountRole::Judge);
    if scope == LoginScope::JudgesOnly && !is_judge {
        return Err(WebError::Forbidden("Access restricted to judges".to_string()));
    }

    if is_judge && !has_judge_profile(state, &account).await? {
        tracing::warn!(account_id = %account.account_id, "Judge account without a judge profile");
        return Err(WebError::Forbidden("No judge profile is linked to this account".to_string()));
    }

    issue(state, account)
}

/// Revoke the caller's token and drop expired revocations.
pub async fn logout(state: &AppState, user: &AuthUser) -> WebResult<()> {
    let revoked = RevokedTokenRepository::new(state.db.pool());
    revoked.revoke(user.jti, user.expires_at).await?;

    if let Some(purged) = best_effort("purge expired tokens", revoked.purge_expired()).await
        && purged > 0
    {
        tracing::debug!("Purged {} expired revocations", purged);
    }

    Ok(())
}

/// Sign in with a Google ID token, creating the account on first use.
pub async fn google_login(state: &AppState, token_id: &str) -> WebResult<AuthPayload> {
    let identity = state.google.verify(token_id).await.map_err(google_error)?;
    let accounts = AccountRepository::new(state.db.pool());

    let account = if let Some(account) = accounts.find_by_google_id(&identity.google_id).await? {
        account
    } else if let Some(existing) = accounts.find_by_email(&identity.email).await? {
        accounts
            .link_google_id(existing.account_id, &identity.google_id)
            .await?
    } else {
        let account = accounts
            .create_external(&NewExternalAccount {
                name: identity.name,
                email: identity.email,
                google_id: identity.google_id,
            })
            .await?;
        tracing::info!(account_id = %account.account_id, "Created account from Google sign-in");
        account
    };

    issue(state, account)
}

pub async fn current_account(state: &AppState, account_id: Uuid) -> WebResult<Account> {
    Ok(AccountRepository::new(state.db.pool())
        .find_by_id(account_id)
        .await?)
}

async fn has_judge_profile(state: &AppState, account: &Account) -> WebResult<bool> {
    let judges = JudgeRepository::new(state.db.pool());

    if judges.find_by_account(account.account_id).await?.is_some() {
        return Ok(true);
    }

    Ok(judges.find_by_email(&account.email).await?.is_some())
}

fn issue(state: &AppState, account: Account) -> WebResult<AuthPayload> {
    let token = state
        .jwt
        .sign(&account)
        .map_err(|e| WebError::InternalServerError(format!("Token signing failed: {e}")))?;

    Ok(AuthPayload {
        user: account,
        token,
    })
}

fn google_error(error: GoogleAuthError) -> WebError {
    match error {
        GoogleAuthError::NotConfigured | GoogleAuthError::Request(_) => {
            WebError::InternalServerError(error.to_string())
        }
        GoogleAuthError::InvalidToken
        | GoogleAuthError::AudienceMismatch
        | GoogleAuthError::UnverifiedEmail => {
            tracing::debug!("Google sign-in rejected: {}", error);
            WebError::Unauthorized("Invalid Google token".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_google_error_mapping() {
        let rejected = google_error(GoogleAuthError::AudienceMismatch).into_response();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

        let unconfigured = google_error(GoogleAuthError::NotConfigured).into_response();
        assert_eq!(unconfigured.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
