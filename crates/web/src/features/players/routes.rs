use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{create_player, import_players, list_players};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route("/import", post(import_players))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
