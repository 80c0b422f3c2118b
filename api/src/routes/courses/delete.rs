use super::common::course_error_response;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::CourseService;
use util::state::AppState;

/// DELETE /api/data/course/{course_id}
///
/// Deletes a course. Admin only. Image files stay in storage unless
/// `PURGE_IMAGES_ON_DELETE` is enabled.
///
/// ### Responses
/// - `200 OK`: `"Course Deleted Successfully"`
/// - `404 Not Found`: `"Course Not Found"`
/// - `500 Internal Server Error`: database failure
pub async fn delete_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let service = CourseService::from_state(&app_state);

    match service.delete(course_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<Empty>::success(
                Empty,
                "Course Deleted Successfully",
            )),
        )
            .into_response(),
        Err(e) => course_error_response(e),
    }
}
