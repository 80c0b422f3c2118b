use sea_orm::DbErr;
use thiserror::Error;
use util::storage::StorageError;

/// Everything that can go wrong while reading or writing courses.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("Course {0} not found")]
    NotFound(i64),

    /// The row existed when the update started but the write matched nothing,
    /// i.e. it was deleted concurrently.
    #[error("Course {0} not found or no changes made")]
    NotFoundOrUnchanged(i64),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Persistence(#[from] DbErr),
}

impl CourseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotFoundOrUnchanged(_))
    }
}
