use axum::{Router, middleware, routing::get};

use super::handlers::{create_judge, delete_judge, get_judge, list_judges, update_judge};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_judges).post(create_judge))
        .route("/:id", get(get_judge).put(update_judge).delete(delete_judge))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
