use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_news, delete_news, get_news, list_news, update_news};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_news))
        .route("/:id", put(update_news).delete(delete_news))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_news))
        .route("/:id", get(get_news))
        .merge(protected)
}
