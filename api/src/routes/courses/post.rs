use super::common::{CourseResponse, course_error_response, read_course_form};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::CourseService;
use util::state::AppState;

/// POST /api/data/course
///
/// Creates a course. Admin only.
///
/// ### Request Body (Multipart Form Data)
/// - `name` (or `coursename`), `description` (or `coursedesc`),
///   `instructor` (or `courseinstruct`): required text fields
/// - `images` / `images[]`: one or more image files
///
/// ### Responses
/// - `201 Created` with the stored course, message `"Course added successfully"`
/// - `400 Bad Request`: `"At least one image file is required."`, a field
///   validation message, or a non-image file
/// - `500 Internal Server Error`: storage or database failure
///
/// Nothing is written to disk or the database when the request is rejected.
pub async fn create_course(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let form = match read_course_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let service = CourseService::from_state(&app_state);
    match service.create(form.fields(), form.uploads).await {
        Ok(course) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CourseResponse::from(course),
                "Course added successfully",
            )),
        )
            .into_response(),
        Err(e) => course_error_response(e),
    }
}
