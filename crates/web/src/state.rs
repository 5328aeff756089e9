use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::auth::{GoogleVerifier, JwtKeys};
use crate::blob::BlobStore;
use crate::mailer::Mailer;
use crate::middleware::auth::ApiKeys;

/// Settings handlers need beyond the connections themselves.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mail_from: String,
    pub default_judge_password: String,
}

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub api_keys: ApiKeys,
    pub jwt: JwtKeys,
    pub google: GoogleVerifier,
    pub blobs: Arc<dyn BlobStore>,
    pub mailer: Arc<dyn Mailer>,
    pub settings: Arc<Settings>,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
