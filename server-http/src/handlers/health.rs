use crate::api::HealthResponse;
use axum::Json;

/// GET /api/v1/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "up".to_string(),
    })
}
