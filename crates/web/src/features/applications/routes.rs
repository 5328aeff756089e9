use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    applications_by_email, apply, delete_application, game_post_holders, list_applications,
    review_application,
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_applications))
        .route("/:id", put(review_application).delete(delete_application))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", post(apply))
        .route("/application", get(applications_by_email))
        .route("/leads", get(game_post_holders))
        .merge(protected)
}
