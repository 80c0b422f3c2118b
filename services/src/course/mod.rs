//! Course service: CRUD over the `courses` table plus the image bookkeeping
//! that keeps stored files and the `images` column in step.
//!
//! File deletions are never awaited here. They are handed to the
//! [`CleanupQueue`] once the database write they depend on has succeeded.

pub mod reconcile;

use crate::error::CourseError;
use common::format_validation_errors;
use db::models::course::Model;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use util::{
    cleanup::{CleanupQueue, CleanupReason},
    config,
    state::AppState,
    storage::{ImageStore, ImageUpload},
};
use validator::Validate;

pub use db::models::course::Model as Course;
pub use reconcile::{ImagePlan, plan_image_update};

/// Editable text fields of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CourseFields {
    #[validate(length(min = 1, max = 200, message = "Course name is required (max 200 characters)"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Course description is required (max 5000 characters)"
    ))]
    pub description: String,

    #[validate(length(min = 1, max = 200, message = "Course instructor is required (max 200 characters)"))]
    pub instructor: String,
}

impl CourseFields {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            instructor: instructor.into(),
        }
    }

    /// Trims surrounding whitespace, then validates.
    fn normalized(self) -> Result<Self, CourseError> {
        let fields = Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
        };
        fields
            .validate()
            .map_err(|e| CourseError::Validation(format_validation_errors(&e)))?;
        Ok(fields)
    }
}

/// Input of an update: new field values, the client's kept list and new files.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub fields: CourseFields,
    pub kept_images: Vec<String>,
    pub uploads: Vec<ImageUpload>,
}

#[derive(Clone)]
pub struct CourseService {
    db: DatabaseConnection,
    store: ImageStore,
    cleanup: CleanupQueue,
    purge_on_delete: bool,
}

impl CourseService {
    pub fn new(db: DatabaseConnection, store: ImageStore, cleanup: CleanupQueue) -> Self {
        Self {
            db,
            store,
            cleanup,
            purge_on_delete: false,
        }
    }

    /// Service wired to the shared state, honouring `PURGE_IMAGES_ON_DELETE`.
    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.db_clone(), state.store().clone(), state.cleanup().clone())
            .with_purge_on_delete(config::purge_images_on_delete())
    }

    /// When set, deleting a course also queues its image files for removal.
    pub fn with_purge_on_delete(mut self, purge: bool) -> Self {
        self.purge_on_delete = purge;
        self
    }

    pub async fn list(&self) -> Result<Vec<Course>, CourseError> {
        Ok(Model::list(&self.db).await?)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Course>, CourseError> {
        Ok(Model::find(&self.db, id).await?)
    }

    /// Creates a course from its fields and at least one image.
    ///
    /// Nothing touches storage or the database until the input is valid.
    pub async fn create(
        &self,
        fields: CourseFields,
        uploads: Vec<ImageUpload>,
    ) -> Result<Course, CourseError> {
        if uploads.is_empty() {
            return Err(CourseError::Validation(
                "At least one image file is required.".to_string(),
            ));
        }
        let fields = fields.normalized()?;
        ensure_images(&uploads)?;

        let paths = self.store_uploads(0, &uploads).await?;

        match Model::create(
            &self.db,
            &fields.name,
            &fields.description,
            &fields.instructor,
            paths.clone(),
        )
        .await
        {
            Ok(course) => {
                tracing::info!(course_id = course.id, images = paths.len(), "Course created");
                Ok(course)
            }
            Err(e) => {
                self.cleanup.enqueue_all(0, paths, CleanupReason::Rollback);
                Err(e.into())
            }
        }
    }

    /// Applies an update and reconciles stored images with the new kept list.
    ///
    /// An unknown id fails with `NotFound` before the input is validated.
    ///
    /// Resulting `images` = kept paths (submitted order, unknown ones dropped)
    /// followed by the new uploads. Paths no longer referenced are queued for
    /// deletion after the row is written.
    pub async fn update(&self, id: i64, update: CourseUpdate) -> Result<Course, CourseError> {
        let course = Model::find(&self.db, id)
            .await?
            .ok_or(CourseError::NotFound(id))?;

        let fields = update.fields.normalized()?;
        ensure_images(&update.uploads)?;

        let uploaded = self.store_uploads(id, &update.uploads).await?;
        let plan = plan_image_update(course.images.as_slice(), &update.kept_images, &uploaded);

        if !plan.ignored.is_empty() {
            tracing::warn!(
                course_id = id,
                ignored = ?plan.ignored,
                "Dropping kept image references the course does not own"
            );
        }

        let affected = match Model::overwrite(
            &self.db,
            id,
            &fields.name,
            &fields.description,
            &fields.instructor,
            plan.images.clone(),
        )
        .await
        {
            Ok(n) => n,
            Err(e) => {
                self.cleanup.enqueue_all(id, uploaded, CleanupReason::Rollback);
                return Err(e.into());
            }
        };

        if affected == 0 {
            self.cleanup.enqueue_all(id, uploaded, CleanupReason::Rollback);
            return Err(CourseError::NotFoundOrUnchanged(id));
        }

        tracing::info!(
            course_id = id,
            kept = plan.images.len() - uploaded.len(),
            added = uploaded.len(),
            removed = plan.to_delete.len(),
            "Course updated"
        );
        self.cleanup
            .enqueue_all(id, plan.to_delete, CleanupReason::Replaced);

        Model::find(&self.db, id)
            .await?
            .ok_or(CourseError::NotFoundOrUnchanged(id))
    }

    /// Deletes a course row.
    ///
    /// Its image files stay on disk unless purge-on-delete is enabled.
    pub async fn delete(&self, id: i64) -> Result<(), CourseError> {
        let existing = Model::find(&self.db, id).await?;
        let removed = Model::delete_by_id(&self.db, id).await?;
        if removed == 0 {
            return Err(CourseError::NotFound(id));
        }

        match existing {
            Some(course) if self.purge_on_delete => {
                self.cleanup.enqueue_all(
                    id,
                    course.images.into_inner(),
                    CleanupReason::CourseDeleted,
                );
            }
            Some(course) if !course.images.as_slice().is_empty() => {
                tracing::info!(
                    course_id = id,
                    images = course.images.as_slice().len(),
                    "Course deleted; image files left in storage"
                );
            }
            _ => tracing::info!(course_id = id, "Course deleted"),
        }

        Ok(())
    }

    /// Writes uploads in order. On failure, anything already written is queued
    /// for removal and the error is returned.
    async fn store_uploads(
        &self,
        course_id: i64,
        uploads: &[ImageUpload],
    ) -> Result<Vec<String>, CourseError> {
        let mut paths = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.store.save(upload).await {
                Ok(path) => paths.push(path),
                Err(e) => {
                    tracing::error!(course_id, file = %upload.file_name, error = %e, "Failed to store upload");
                    self.cleanup
                        .enqueue_all(course_id, paths, CleanupReason::Rollback);
                    return Err(e.into());
                }
            }
        }
        Ok(paths)
    }
}

fn ensure_images(uploads: &[ImageUpload]) -> Result<(), CourseError> {
    if let Some(bad) = uploads.iter().find(|u| !u.looks_like_image()) {
        return Err(CourseError::Validation(format!(
            "File '{}' is not an image",
            bad.file_name
        )));
    }
    Ok(())
}
