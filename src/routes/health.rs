//! Health check HTTP route handlers
//!
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/ready` - Readiness check (pings the document store)

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use bson::doc;
use mongodb::Database;

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    pub db: Database,
}

/// Create the health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(simple_health))
        .route("/health/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple liveness check - returns OK whenever the server is responding
async fn simple_health() -> &'static str {
    "OK"
}

/// Readiness probe pinging the document store
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    match state.db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "document store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health() {
        assert_eq!(simple_health().await, "OK");
    }
}
