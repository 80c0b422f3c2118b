//! HTTP client for the course admin API.

use crate::error::ClientError;
use crate::form::{PendingImage, UpdatePayload};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, de::DeserializeOwned};

/// A course as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Text fields for a new course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    pub instructor: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: String,
}

#[derive(Clone)]
pub struct CourseClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CourseClient {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, token)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/data{}", self.base_url, path)
    }

    /// Public URL of a stored image path such as `uploads/<uuid>.png`.
    pub fn image_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn list(&self) -> Result<Vec<CourseRecord>, ClientError> {
        let res = self
            .http
            .get(self.url("/course"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let (data, message) = read_envelope::<Vec<CourseRecord>>(res).await?;
        data.ok_or(ClientError::MissingData(message))
    }

    /// `Ok(None)` when the server has no course with this id.
    pub async fn fetch(&self, id: i64) -> Result<Option<CourseRecord>, ClientError> {
        let res = self
            .http
            .get(self.url(&format!("/course/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let (data, _) = read_envelope::<CourseRecord>(res).await?;
        Ok(data)
    }

    pub async fn create(
        &self,
        course: &NewCourse,
        images: &[PendingImage],
    ) -> Result<CourseRecord, ClientError> {
        let mut form = Form::new()
            .text("name", course.name.clone())
            .text("description", course.description.clone())
            .text("instructor", course.instructor.clone());
        for image in images {
            form = form.part("images", image_part(image)?);
        }

        let res = self
            .http
            .post(self.url("/course"))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        let (data, message) = read_envelope::<CourseRecord>(res).await?;
        data.ok_or(ClientError::MissingData(message))
    }

    /// Updates a course without going through a form: `kept` lists the stored
    /// paths to keep, in order, and `files` are appended after them.
    pub async fn update(
        &self,
        id: i64,
        course: &NewCourse,
        kept: &[String],
        files: &[PendingImage],
    ) -> Result<CourseRecord, ClientError> {
        self.submit(&UpdatePayload {
            course_id: id,
            name: course.name.clone(),
            description: course.description.clone(),
            instructor: course.instructor.clone(),
            existing_images: kept.to_vec(),
            new_files: files.to_vec(),
        })
        .await
    }

    /// Sends the edit form built by [`crate::CourseForm::apply`]: fields, kept
    /// image paths as JSON, and new files.
    pub async fn submit(&self, payload: &UpdatePayload) -> Result<CourseRecord, ClientError> {
        let existing = serde_json::to_string(&payload.existing_images)?;

        let mut form = Form::new()
            .text("name", payload.name.clone())
            .text("description", payload.description.clone())
            .text("instructor", payload.instructor.clone())
            .text("existingImages", existing);
        for image in &payload.new_files {
            form = form.part("images", image_part(image)?);
        }

        let res = self
            .http
            .patch(self.url(&format!("/courseupdate/{}", payload.course_id)))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        let (data, message) = read_envelope::<CourseRecord>(res).await?;
        data.ok_or(ClientError::MissingData(message))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.url(&format!("/course/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        read_envelope::<serde_json::Value>(res).await?;
        Ok(())
    }
}

fn image_part(image: &PendingImage) -> Result<Part, ClientError> {
    let part = Part::bytes(image.bytes.to_vec()).file_name(image.file_name.clone());
    match &image.content_type {
        Some(ct) => Ok(part.mime_str(ct)?),
        None => Ok(part),
    }
}

/// Splits a response into its envelope data and message, turning non-2xx
/// statuses and `success: false` into [`ClientError::Api`].
async fn read_envelope<T: DeserializeOwned>(
    res: reqwest::Response,
) -> Result<(Option<T>, String), ClientError> {
    let status = res.status();
    let body = res.text().await?;

    let envelope: Envelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !status.is_success() || !envelope.success {
        tracing::debug!(status = status.as_u16(), message = %envelope.message, "API error");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope.message,
        });
    }

    Ok((envelope.data, envelope.message))
}
