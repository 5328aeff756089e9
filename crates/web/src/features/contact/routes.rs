use axum::{Router, routing::post};

use super::handlers::submit_message;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit_message))
}
