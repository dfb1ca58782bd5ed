/// Health check endpoint
///
/// Verifies the server is running and probes connectivity of both
/// stores.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "users_store": "connected",
///   "tasks_store": "connected"
/// }
/// ```

use crate::{app::AppState, error::WebResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Users store connectivity
    pub users_store: String,

    /// Tasks store connectivity
    pub tasks_store: String,
}

async fn probe(pool: &PgPool) -> &'static str {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    }
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> WebResult<Json<HealthResponse>> {
    let users_store = probe(&state.users_db).await;
    let tasks_store = probe(&state.tasks_db).await;

    let status = if users_store == "connected" && tasks_store == "connected" {
        "healthy"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users_store: users_store.to_string(),
        tasks_store: tasks_store.to_string(),
    }))
}
