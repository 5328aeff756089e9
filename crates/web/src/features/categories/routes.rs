use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_category))
        .route("/:id", put(update_category).delete(delete_category))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_categories))
        .route("/:id", get(get_category))
        .merge(protected)
}
