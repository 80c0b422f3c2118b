use super::common::{CourseResponse, course_error_response, read_course_form};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::{CourseService, CourseUpdate};
use util::state::AppState;

/// PATCH /api/data/courseupdate/{course_id}
///
/// Updates a course and reconciles its images. Admin only.
///
/// ### Request Body (Multipart Form Data)
/// - `name`, `description`, `instructor` (legacy `course*` names accepted)
/// - `existingImages`: JSON array of the stored paths to keep, in display order
/// - `images` / `images[]`: new image files, appended after the kept ones
///
/// Stored images missing from `existingImages` are removed from storage in the
/// background after the row is written.
///
/// ### Responses
/// - `200 OK` with the updated course, message `"Course updated successfully"`
/// - `400 Bad Request`: `existingImages` missing or not a JSON array of strings,
///   invalid fields, or a non-image upload. A missing list is rejected rather
///   than read as `[]`, which would drop every stored image.
/// - `404 Not Found`: `"Course Not Found"` (checked before the input is
///   validated), or `"Course not found or no changes made."` when the row
///   vanished before the write
/// - `500 Internal Server Error`: storage or database failure
pub async fn update_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let form = match read_course_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let kept_images = match form.kept_images() {
        Ok(kept) => kept,
        Err(response) => return response,
    };

    let update = CourseUpdate {
        fields: form.fields(),
        kept_images,
        uploads: form.uploads,
    };

    let service = CourseService::from_state(&app_state);
    match service.update(course_id, update).await {
        Ok(course) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CourseResponse::from(course),
                "Course updated successfully",
            )),
        )
            .into_response(),
        Err(e) => course_error_response(e),
    }
}
