//! Course request parsing, response models and error mapping shared by the
//! `/data` handlers.

use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::course::Model as CourseModel;
use serde::Serialize;
use services::{CourseError, CourseFields};
use util::storage::ImageUpload;

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CourseModel> for CourseResponse {
    fn from(course: CourseModel) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            instructor: course.instructor,
            images: course.images.into_inner(),
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
        }
    }
}

/// Fields collected from a course multipart form.
///
/// Both the plain names and the admin panel's legacy names are accepted
/// (`name`/`coursename`, `description`/`coursedesc`,
/// `instructor`/`courseinstruct`). Files may be sent as `images` or `images[]`.
#[derive(Debug, Default)]
pub struct CourseForm {
    pub name: String,
    pub description: String,
    pub instructor: String,
    /// Raw `existingImages` value, still JSON-encoded.
    pub existing_images: Option<String>,
    pub uploads: Vec<ImageUpload>,
}

impl CourseForm {
    pub fn fields(&self) -> CourseFields {
        CourseFields::new(&self.name, &self.description, &self.instructor)
    }

    /// Decodes `existingImages` as a JSON array of storage paths.
    pub fn kept_images(&self) -> Result<Vec<String>, Response> {
        let raw = self.existing_images.as_deref().ok_or_else(|| {
            bad_request("existingImages is required and must be a JSON array of image paths")
        })?;
        serde_json::from_str::<Vec<String>>(raw)
            .map_err(|_| bad_request("existingImages must be a JSON array of image paths"))
    }
}

/// Reads every part of a course form. File parts with no filename or no bytes
/// are skipped, which is what browsers send for an empty file input.
pub async fn read_course_form(multipart: &mut Multipart) -> Result<CourseForm, Response> {
    let mut form = CourseForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(multipart_error(e)),
        };
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "name" | "coursename" => form.name = field.text().await.map_err(multipart_error)?,
            "description" | "coursedesc" => {
                form.description = field.text().await.map_err(multipart_error)?
            }
            "instructor" | "courseinstruct" => {
                form.instructor = field.text().await.map_err(multipart_error)?
            }
            "existingImages" => {
                form.existing_images = Some(field.text().await.map_err(multipart_error)?)
            }
            "images" | "images[]" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                match file_name {
                    Some(file_name) if !file_name.is_empty() && !bytes.is_empty() => {
                        form.uploads
                            .push(ImageUpload::new(file_name, content_type, bytes));
                    }
                    _ => tracing::debug!("Skipping empty image part"),
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Response {
    tracing::warn!(error = %e, "Rejected malformed multipart body");
    (
        e.status(),
        Json(ApiResponse::<Empty>::error(format!(
            "Invalid form data: {}",
            e.body_text()
        ))),
    )
        .into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<Empty>::error(message)),
    )
        .into_response()
}

/// Maps a service error to its status code and an error envelope.
pub fn course_error_response(err: CourseError) -> Response {
    let (status, message) = match &err {
        CourseError::NotFound(_) => (StatusCode::NOT_FOUND, "Course Not Found".to_string()),
        CourseError::NotFoundOrUnchanged(_) => (
            StatusCode::NOT_FOUND,
            "Course not found or no changes made.".to_string(),
        ),
        CourseError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        CourseError::Storage(e) => {
            tracing::error!(error = %e, "Image storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store image files".to_string(),
            )
        }
        CourseError::Persistence(e) => {
            tracing::error!(error = %e, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            )
        }
    };

    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}
