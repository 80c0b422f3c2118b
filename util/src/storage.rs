//! On-disk storage for course images.
//!
//! Images live under `{root}/uploads/` and are referenced everywhere else by
//! their *relative* storage path (`uploads/<uuid>.<ext>`). That relative form
//! is what gets persisted on the course row and what the static file route
//! serves, so this module is the only place that turns it back into a real
//! filesystem location.

use crate::paths::{self, UPLOADS_DIR};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage path: {0}")]
    InvalidPath(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single uploaded image as received from a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// True if either the declared content type or the filename extension says image.
    pub fn looks_like_image(&self) -> bool {
        let declared = self
            .content_type
            .as_deref()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        let guessed = mime_guess::from_path(&self.file_name)
            .first()
            .map(|m| m.type_() == mime_guess::mime::IMAGE)
            .unwrap_or(false);
        declared || guessed
    }
}

/// Extension used for the stored file: lowercased original extension when it is
/// plain ASCII alphanumeric, `bin` otherwise.
pub fn stored_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

/// Filesystem-backed image store rooted at an absolute directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured `STORAGE_ROOT`.
    pub fn from_config() -> Self {
        Self::new(paths::storage_root())
    }

    pub fn uploads_dir(&self) -> PathBuf {
        paths::uploads_dir(&self.root)
    }

    /// Writes an upload to disk and returns its relative storage path.
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, StorageError> {
        let dir = self.uploads_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), stored_extension(&upload.file_name));
        let rel = paths::upload_rel_path(&stored_name);
        tokio::fs::write(dir.join(&stored_name), &upload.bytes).await?;

        tracing::debug!(path = %rel, bytes = upload.bytes.len(), original = %upload.file_name, "Stored image");
        Ok(rel)
    }

    /// Resolves a relative storage path to its absolute location.
    ///
    /// Only paths inside `uploads/` are accepted; absolute paths and any
    /// `..`/root components are rejected.
    pub fn resolve(&self, rel: &str) -> Result<PathBuf, StorageError> {
        let rel_path = Path::new(rel);
        let mut components = rel_path.components();

        match components.next() {
            Some(Component::Normal(first)) if first == UPLOADS_DIR => {}
            _ => return Err(StorageError::InvalidPath(rel.to_string())),
        }

        let mut rest = 0;
        for component in components {
            match component {
                Component::Normal(_) => rest += 1,
                _ => return Err(StorageError::InvalidPath(rel.to_string())),
            }
        }
        if rest == 0 {
            return Err(StorageError::InvalidPath(rel.to_string()));
        }

        Ok(self.root.join(rel_path))
    }

    pub async fn exists(&self, rel: &str) -> bool {
        match self.resolve(rel) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Removes a stored image. `Ok(false)` means the file was already gone.
    pub async fn remove(&self, rel: &str) -> Result<bool, StorageError> {
        let path = self.resolve(rel)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
