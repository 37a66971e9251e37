use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Chalkboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "School portal backend: announcements, rosters, sessions",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "auth": "/auth/login"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Chalkboard API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "School portal backend: announcements, rosters, sessions".to_string(),
        status: "operational".to_string(),
    })
}
