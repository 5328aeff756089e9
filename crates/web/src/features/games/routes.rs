use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_game, delete_game, get_game, list_games, update_game};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_game))
        .route("/:id", put(update_game).delete(delete_game))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_games))
        .route("/:id", get(get_game))
        .merge(protected)
}
