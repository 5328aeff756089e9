use sqlx::PgPool;
use storage::{
    dto::account::NewAccount,
    dto::common::normalize_email,
    dto::judge::{CreateJudgeRequest, JudgeResponse, UpdateJudgeRequest},
    error::{Result, StorageError},
    models::{AccountRole, Judge},
    repository::{AccountRepository, GameRepository, JudgeRepository},
    services::best_effort,
};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::{WebError, WebResult};
use crate::mailer::{judge_assignment_mail, send_in_background};
use crate::state::AppState;

/// Create the judge's login account and profile, then notify the judge by mail.
pub async fn create_judge(state: &AppState, req: &CreateJudgeRequest) -> WebResult<JudgeResponse> {
    let pool = state.db.pool();
    let req = CreateJudgeRequest {
        email: normalize_email(&req.email),
        ..req.clone()
    };

    if JudgeRepository::new(pool).find_by_email(&req.email).await?.is_some() {
        return Err(WebError::Conflict("A judge with this email already exists".to_string()));
    }
    if AccountRepository::new(pool)
        .find_by_email(&req.email)
        .await?
        .is_some()
    {
        return Err(WebError::Conflict("An account with this email already exists".to_string()));
    }

    let password_hash = hash_password(&state.settings.default_judge_password)
        .map_err(|e| WebError::InternalServerError(format!("Password hashing failed: {e}")))?;

    let accounts = AccountRepository::new(pool);
    let account = accounts
        .create(&NewAccount {
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash,
            role: AccountRole::Judge,
            cnic: None,
        })
        .await?;

    let judge = match JudgeRepository::new(pool).create(&req, account.account_id).await {
        Ok(judge) => judge,
        Err(e) => {
            // Don't leave a judge account without a profile behind.
            best_effort("remove orphaned judge account", accounts.delete(account.account_id)).await;
            return Err(e.into());
        }
    };
    tracing::info!(judge_id = %judge.judge_id, "Judge created");

    notify_assignment(state, &judge, req.assigned_games.first().copied()).await;

    Ok(with_assignments(pool, judge).await?)
}

pub async fn list_judges(pool: &PgPool) -> Result<Vec<JudgeResponse>> {
    let judges = JudgeRepository::new(pool).list().await?;

    let mut responses = Vec::with_capacity(judges.len());
    for judge in judges {
        responses.push(with_assignments(pool, judge).await?);
    }

    Ok(responses)
}

pub async fn get_judge(pool: &PgPool, id: Uuid) -> Result<JudgeResponse> {
    let judge = JudgeRepository::new(pool).find_by_id(id).await?;

    with_assignments(pool, judge).await
}

/// Merge the profile, replace the assignment if given, and keep the linked
/// account's name and email in step.
pub async fn update_judge(
    state: &AppState,
    id: Uuid,
    req: &UpdateJudgeRequest,
) -> WebResult<JudgeResponse> {
    let pool = state.db.pool();
    let judges = JudgeRepository::new(pool);
    let accounts = AccountRepository::new(pool);

    let existing = judges.find_by_id(id).await?;
    let req = UpdateJudgeRequest {
        email: req.email.as_deref().map(normalize_email),
        ..req.clone()
    };

    if let Some(ref email) = req.email
        && *email != existing.email
        && let Some(other) = accounts.find_by_email(email).await?
        && Some(other.account_id) != existing.account_id
    {
        return Err(WebError::Conflict("An account with this email already exists".to_string()));
    }

    let judge = judges.update(id, &req).await?;

    if let Some(account_id) = judge.account_id
        && (judge.name != existing.name || judge.email != existing.email)
    {
        match accounts.update_identity(account_id, &judge.name, &judge.email).await {
            Ok(_) | Err(StorageError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(with_assignments(pool, judge).await?)
}

/// Remove the judge and the account it signs in with
pub async fn delete_judge(pool: &PgPool, id: Uuid) -> Result<Judge> {
    let judge = JudgeRepository::new(pool).delete(id).await?;

    if let Some(account_id) = judge.account_id {
        match AccountRepository::new(pool).delete(account_id).await {
            Ok(()) | Err(StorageError::NotFound) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(judge)
}

async fn with_assignments(pool: &PgPool, judge: Judge) -> Result<JudgeResponse> {
    let assignments = JudgeRepository::new(pool).assignments(judge.judge_id).await?;

    Ok(JudgeResponse { judge, assignments })
}

async fn notify_assignment(state: &AppState, judge: &Judge, game_id: Option<Uuid>) {
    let games = GameRepository::new(state.db.pool());
    let game_title = match game_id {
        Some(game_id) => best_effort("look up assigned game", games.find_by_id(game_id))
            .await
            .map(|game| game.title),
        None => None,
    };

    let mail = judge_assignment_mail(
        &state.settings.mail_from,
        &judge.email,
        &judge.name,
        game_title.as_deref(),
        &state.settings.default_judge_password,
    );

    send_in_background(state.mailer.clone(), mail);
}
