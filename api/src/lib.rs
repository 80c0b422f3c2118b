pub mod auth;
pub mod response;
pub mod routes;

use crate::{auth::middleware::log_request, routes::routes};
use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use util::state::AppState;

/// Builds the full application: `/api` routes, static images under `/uploads`,
/// request logging and CORS.
pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);
    let uploads = ServeDir::new(app_state.store().uploads_dir());

    Router::new()
        .nest("/api", routes(app_state))
        .nest_service("/uploads", uploads)
        .layer(from_fn(log_request))
        .layer(cors)
}
