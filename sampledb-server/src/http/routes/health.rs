//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::PoolStatus;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Connection usage, to spot leaked connections
    pub pool: PoolStatus,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pool: state.directory.pool_status(),
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use crate::db::MemoryDirectory;
    use crate::http::routes::testing::{app, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn health_reports_pool() {
        let dir = MemoryDirectory::with_max_connections(3);
        let app = app(dir);

        // A listing checks a connection out and returns it
        send(&app, Method::GET, "/agents", None).await;
        let reply = send(&app, Method::GET, "/health", None).await;

        assert_eq!(reply.status, StatusCode::OK);
        let body = reply.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["pool"]["max"], 3);
        assert_eq!(body["pool"]["idle"], 3);
    }
}
