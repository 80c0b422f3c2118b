use super::common::{CourseResponse, course_error_response};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::CourseService;
use util::state::AppState;

/// GET /api/data/course
///
/// Lists every course, oldest first.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "name": "Rust 101",
///       "description": "Ownership and borrowing",
///       "instructor": "Ferris",
///       "images": ["uploads/4f7c2a9e-....png"],
///       "created_at": "2025-10-16T08:00:00+00:00",
///       "updated_at": "2025-10-16T08:00:00+00:00"
///     }
///   ],
///   "message": "Courses retrieved successfully"
/// }
/// ```
/// - `500 Internal Server Error` on database failure.
pub async fn get_courses(State(app_state): State<AppState>) -> impl IntoResponse {
    let service = CourseService::from_state(&app_state);

    match service.list().await {
        Ok(courses) => {
            let data: Vec<CourseResponse> = courses.into_iter().map(CourseResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Courses retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => course_error_response(e),
    }
}

/// GET /api/data/course/{course_id}
///
/// Fetches one course. An unknown id is not an error here: the response is
/// `200` with `data: null`, and the admin panel shows an empty form.
///
/// ### Responses
/// - `200 OK` with the course, or with `"data": null` and message `"Course not found"`.
/// - `500 Internal Server Error` on database failure.
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let service = CourseService::from_state(&app_state);

    match service.find(course_id).await {
        Ok(Some(course)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(CourseResponse::from(course)),
                "Course retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse::<Option<CourseResponse>>::success(
                None,
                "Course not found",
            )),
        )
            .into_response(),
        Err(e) => course_error_response(e),
    }
}
