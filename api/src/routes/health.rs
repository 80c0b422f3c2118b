use crate::response::ApiResponse;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;
use util::{cleanup::CleanupStats, state::AppState};

/// Builds the `/health` route group.
///
/// A single public `GET /health` endpoint for uptime checks and load balancers.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cleanup: CleanupStats,
    pub cleanup_pending: u64,
}

/// GET /health
///
/// Reports that the API is up, along with the image cleanup counters.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "status": "OK",
///     "cleanup": { "queued": 3, "deleted": 2, "missing": 1, "failed": 0 },
///     "cleanup_pending": 0
///   },
///   "message": "Health check passed"
/// }
/// ```
pub async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let stats = app_state.cleanup().stats();
    Json(ApiResponse::success(
        HealthResponse {
            status: "OK",
            cleanup: stats,
            cleanup_pending: stats.pending(),
        },
        "Health check passed",
    ))
}
