use crate::config::AppConfig;
use std::env;
use tempfile::TempDir;

/// Secret used to sign and verify tokens in tests.
pub const TEST_JWT_SECRET: &str = "course-admin-test-secret";

/// Makes sure the global config can load in a test process (no `.env` needed)
/// and pins the values tests rely on.
pub fn init_test_config() {
    unsafe {
        env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    }
    AppConfig::set_env("test");
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    AppConfig::set_purge_images_on_delete(false);
}

/// Creates a unique temporary directory and points `STORAGE_ROOT` at its
/// absolute path. The directory is removed when the returned `TempDir` is dropped.
///
/// Keep the returned `TempDir` in scope for as long as you need the files.
pub fn setup_test_storage_root() -> TempDir {
    init_test_config();
    let tmp = TempDir::new().expect("failed to create tempdir");
    let abs = tmp
        .path()
        .canonicalize()
        .unwrap_or_else(|_| tmp.path().to_path_buf());
    AppConfig::set_storage_root(abs.to_string_lossy().to_string());
    tmp
}
