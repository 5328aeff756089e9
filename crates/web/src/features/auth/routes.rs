use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{google_login, judge_login, login, logout, me, register};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/judge-login", post(judge_login))
        .route("/logout", post(logout))
        .route("/google", post(google_login))
        .route("/me", get(me))
}
