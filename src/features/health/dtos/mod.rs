use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    #[schema(example = "OK")]
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
