use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
