use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_announcement, delete_announcement, get_announcement, list_announcements, update_announcement};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_announcement))
        .route("/:id", put(update_announcement).delete(delete_announcement))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_announcements))
        .route("/:id", get(get_announcement))
        .merge(protected)
}
