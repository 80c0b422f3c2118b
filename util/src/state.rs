//! Application state container shared across Axum route handlers and services.
//!
//! Holds the database connection, the image store and the handle to the
//! background cleanup worker. Everything inside is cheap to clone, so the
//! state is passed to handlers by value through Axum's `State<T>` extractor.

use crate::cleanup::CleanupQueue;
use crate::storage::ImageStore;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    store: ImageStore,
    cleanup: CleanupQueue,
}

impl AppState {
    /// Creates a new `AppState` and spawns the cleanup worker for `store`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(db: DatabaseConnection, store: ImageStore) -> Self {
        let cleanup = CleanupQueue::spawn(store.clone());
        Self { db, store, cleanup }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn cleanup(&self) -> &CleanupQueue {
        &self.cleanup
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
