use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Name of the folder (under the storage root) holding course images.
/// Stored image references always start with this segment.
pub const UPLOADS_DIR: &str = "uploads";

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `config::storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    absolutize(config::storage_root())
}

/// Uploads folder for a given root: {root}/uploads
pub fn uploads_dir<P: AsRef<Path>>(root: P) -> PathBuf {
    root.as_ref().join(UPLOADS_DIR)
}

/// Relative storage path for a stored image name: "uploads/{stored_name}"
pub fn upload_rel_path(stored_name: &str) -> String {
    format!("{UPLOADS_DIR}/{stored_name}")
}

/// Turns a possibly relative path into an absolute one rooted at the current dir.
pub fn absolutize<P: AsRef<Path>>(path: P) -> PathBuf {
    let p = path.as_ref();
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}
