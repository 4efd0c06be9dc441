// src/handlers/health.rs

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub message: String,
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/",
    tag = "System",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn root() -> Json<HealthStatus> {
    Json(HealthStatus {
        message: "Mini Quiz Platform API".to_string(),
        status: "running".to_string(),
    })
}
