//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/data` → Course management used by the admin panel (authenticated reads, admin writes)

use crate::routes::{courses::course_routes, health::health_routes};
use axum::Router;
use util::state::AppState;

pub mod courses;
pub mod health;

/// Builds the router for everything under `/api`.
///
/// Access control is attached per route inside each group, so the groups can
/// be mounted here without extra layers.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/data", course_routes())
        .with_state(app_state)
}
