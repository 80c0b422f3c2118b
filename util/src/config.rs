//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables (and `.env`).
//! Free-function getters below are what the rest of the workspace calls; the
//! per-field setters exist so tests can override values at runtime.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub storage_root: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub max_upload_mb: usize,
    pub purge_images_on_delete: bool,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    matches!(
        env::var(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Ok("true") | Ok("1") | Ok("yes")
    )
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Panics if `JWT_SECRET` is missing; every other key has a default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "course-admin".into()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "api=info,services=info,util=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: flag("LOG_TO_STDOUT"),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "data/courses.db".into()),
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "data/storage".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_or("PORT", 5000),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 60),
            max_upload_mb: parse_or("MAX_UPLOAD_MB", 20),
            purge_images_on_delete: flag("PURGE_IMAGES_ON_DELETE"),
        }
    }

    /// Returns a clone of the global configuration.
    pub fn global() -> AppConfig {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
            .clone()
    }

    /// Reloads the configuration from environment variables, dropping overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.storage_root = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_max_upload_mb(value: usize) {
        AppConfig::set_field(|cfg| cfg.max_upload_mb = value);
    }

    pub fn set_purge_images_on_delete(value: bool) {
        AppConfig::set_field(|cfg| cfg.purge_images_on_delete = value);
    }
}

// --- Getters ---

pub fn env() -> String {
    AppConfig::global().env
}

pub fn project_name() -> String {
    AppConfig::global().project_name
}

pub fn log_level() -> String {
    AppConfig::global().log_level
}

pub fn log_file() -> String {
    AppConfig::global().log_file
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path
}

pub fn storage_root() -> String {
    AppConfig::global().storage_root
}

pub fn host() -> String {
    AppConfig::global().host
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

/// Upper bound for a whole multipart request body, in bytes.
pub fn max_upload_bytes() -> usize {
    AppConfig::global().max_upload_mb.saturating_mul(1024 * 1024)
}

pub fn purge_images_on_delete() -> bool {
    AppConfig::global().purge_images_on_delete
}
