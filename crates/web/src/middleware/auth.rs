use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::NaiveDateTime;
use storage::models::AccountRole;
use storage::repository::RevokedTokenRepository;
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Account authenticated by a valid, non-revoked session token.
///
/// Add this as a handler parameter to require a signed-in caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub email: String,
    pub role: String,
    pub jti: Uuid,
    pub expires_at: NaiveDateTime,
}

impl AuthUser {
    pub fn has_role(&self, role: AccountRole) -> bool {
        self.role == role.as_str()
    }

    pub fn require_role(&self, role: AccountRole) -> Result<(), WebError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(WebError::Forbidden("Insufficient permissions".to_string()))
        }
    }

    /// Verify a session token and make sure it has not been revoked.
    pub async fn from_token(state: &AppState, token: &str) -> Result<Self, WebError> {
        let claims = state.jwt.verify(token).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            WebError::Unauthorized("Invalid or expired token".to_string())
        })?;

        if RevokedTokenRepository::new(state.db.pool())
            .is_revoked(claims.jti)
            .await?
        {
            return Err(WebError::Unauthorized("Token has been revoked".to_string()));
        }

        Ok(Self {
            account_id: claims.sub,
            expires_at: claims.expires_at(),
            email: claims.email,
            role: claims.role,
            jti: claims.jti,
        })
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(WebError::unauthorized)?;
        AuthUser::from_token(state, token).await
    }
}

/// Who was let through an admin-only route.
#[derive(Debug, Clone)]
pub enum AdminPrincipal {
    ApiKey,
    Account(AuthUser),
}

/// Admin access is an API key or a session token of an `admin` account.
pub async fn authorize_admin(state: &AppState, headers: &HeaderMap) -> Result<AdminPrincipal, WebError> {
    let token = bearer_token(headers).ok_or_else(WebError::unauthorized)?;

    if state.api_keys.is_valid(token) {
        return Ok(AdminPrincipal::ApiKey);
    }

    let user = AuthUser::from_token(state, token).await?;
    if !user.has_role(AccountRole::Admin) {
        tracing::warn!(account_id = %user.account_id, "Non-admin attempted an admin operation");
        return Err(WebError::Forbidden("Admin access required".to_string()));
    }

    Ok(AdminPrincipal::Account(user))
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    authorize_admin(&state, req.headers()).await?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_api_keys_parsing() {
        let keys = ApiKeys::from_comma_separated(" key-one, ,key-two,");

        assert!(keys.is_valid("key-one"));
        assert!(keys.is_valid("key-two"));
        assert!(!keys.is_valid(""));
        assert!(!keys.is_valid("key-three"));
    }

    #[test]
    fn test_empty_key_list_accepts_nothing() {
        let keys = ApiKeys::from_comma_separated("");
        assert!(!keys.is_valid(""));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
