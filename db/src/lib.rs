pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use util::{config, paths};

/// Builds a connection URL from `DATABASE_PATH`.
///
/// DSNs are passed through untouched; anything else is treated as a SQLite file
/// path, and its parent directory is created since SQLite won't create it.
pub fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url.to_string()
    } else {
        if let Err(e) = paths::ensure_parent_dir(path_or_url) {
            tracing::warn!(path = path_or_url, error = %e, "Could not create database directory");
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

pub async fn try_connect() -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url(&config::database_path())).await
}

pub async fn connect() -> DatabaseConnection {
    try_connect().await.expect("Failed to connect to database")
}
