use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{announce_result, assigned_games};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assigned-games", get(assigned_games))
        .route("/results/:game_id", post(announce_result))
}
