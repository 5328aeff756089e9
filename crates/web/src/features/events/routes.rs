use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_event, delete_event, get_event, list_events, update_event};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:id", put(update_event).delete(delete_event))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_events))
        .route("/:id", get(get_event))
        .merge(protected)
}
