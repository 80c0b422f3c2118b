//! # Course Routes Module
//!
//! Routes for the `/api/data` endpoint group, which the admin panel uses to
//! manage courses and their images.
//!
//! ## Structure
//! - `get.rs`: list and fetch
//! - `post.rs`: create (multipart)
//! - `patch.rs`: update with image reconciliation (multipart)
//! - `delete.rs`: delete
//! - `common.rs`: form parsing, response model and error mapping

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, patch, post},
};
use delete::delete_course;
use get::{get_course, get_courses};
use patch::update_course;
use post::create_course;
use util::{config, state::AppState};

pub mod common;
pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

/// Builds the `/data` route group.
///
/// Routes:
/// - `GET    /course`                     → list courses (authenticated)
/// - `GET    /course/{course_id}`         → fetch one course (authenticated)
/// - `POST   /course`                     → create a course (admin only)
/// - `PATCH  /courseupdate/{course_id}`   → update a course (admin only)
/// - `DELETE /course/{course_id}`         → delete a course (admin only)
///
/// Multipart routes accept bodies up to `MAX_UPLOAD_MB`.
pub fn course_routes() -> Router<AppState> {
    let upload_limit = DefaultBodyLimit::max(config::max_upload_bytes());

    Router::new()
        .route(
            "/course",
            get(get_courses).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/course",
            post(create_course)
                .layer(upload_limit.clone())
                .route_layer(from_fn(allow_admin)),
        )
        .route(
            "/course/{course_id}",
            get(get_course).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/course/{course_id}",
            delete(delete_course).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/courseupdate/{course_id}",
            patch(update_course)
                .layer(upload_limit)
                .route_layer(from_fn(allow_admin)),
        )
}
