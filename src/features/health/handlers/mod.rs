use axum::Json;

use crate::features::health::dtos::HealthResponseDto;

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponseDto),
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "OK".to_string(),
        message: "Video Upload Backend is running".to_string(),
        timestamp: chrono::Utc::now(),
    })
}
