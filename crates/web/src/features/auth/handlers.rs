use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use storage::dto::{
    account::{AuthPayload, GoogleLoginRequest, LoginRequest, RegisterRequest},
    common::{ApiResponse, StatusMessage, SuccessResponse},
};
use storage::models::{Account, AccountRole};
use validator::Validate;

use crate::extract::AppJson;
use crate::error::{ErrorBody, WebError};
use crate::middleware::auth::{AuthUser, authorize_admin};
use crate::state::AppState;

use super::services::{self, LoginScope};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, wrapped as { success, message, data }", body = Account),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 403, description = "Privileged role requested without admin access", body = ErrorBody),
        (status = 409, description = "Email or CNIC already registered", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    // Only an administrator may hand out the admin and judge roles.
    if matches!(req.role_or_default(), AccountRole::Admin | AccountRole::Judge) {
        authorize_admin(&state, &headers).await?;
    }

    let account = services::register(&state, &req).await?;
    tracing::info!(account_id = %account.account_id, role = %account.role, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User registered successfully", account)),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, wrapped as { success, message, data }", body = AuthPayload),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 403, description = "Judge account without a judge profile", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let payload = services::login(&state, &req, LoginScope::Any).await?;

    Ok(Json(ApiResponse::new("Login successful", payload)).into_response())
}

#[utoipa::path(
    post,
    path = "/auth/judge-login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Judge signed in, wrapped as { success, message, data }", body = AuthPayload),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 403, description = "Not a judge", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn judge_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let payload = services::login(&state, &req, LoginScope::JudgesOnly).await?;

    Ok(Json(ApiResponse::new("Judge login successful", payload)).into_response())
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Token revoked", body = StatusMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> Result<Response, WebError> {
    services::logout(&state, &user).await?;

    Ok(Json(StatusMessage::ok("Logged out successfully")).into_response())
}

#[utoipa::path(
    post,
    path = "/auth/google",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Signed in with Google", body = AuthPayload),
        (status = 401, description = "Token rejected", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn google_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<GoogleLoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let payload = services::google_login(&state, &req.token_id).await?;

    Ok(Json(payload).into_response())
}

#[utoipa::path(
    get,
    path = "/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The signed-in account, wrapped as { success, data }", body = Account),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Response, WebError> {
    let account = services::current_account(&state, user.account_id).await?;

    Ok(Json(SuccessResponse::new(account)).into_response())
}
