//! Background image cleanup.
//!
//! Request handlers never delete image files themselves. They enqueue a
//! [`CleanupJob`] and return; a single worker task owned by the queue drains
//! jobs in order, removes the files through the [`ImageStore`], and records
//! what happened. Outcomes are counted (see [`CleanupStats`]) and broadcast to
//! any subscriber, so failures are observable instead of vanishing into a
//! detached callback.

use crate::storage::{ImageStore, StorageError};
use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::{broadcast, mpsc, oneshot};

/// Why an image is being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupReason {
    /// Dropped from a course's kept list during an update.
    Replaced,
    /// Owned by a course that was deleted.
    CourseDeleted,
    /// Written during a request whose database write failed.
    Rollback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupJob {
    pub course_id: i64,
    pub path: String,
    pub reason: CleanupReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CleanupOutcome {
    Deleted,
    /// The file was already gone; not an error.
    Missing,
    /// The path points outside the uploads folder and was left alone.
    Rejected,
    Failed(String),
}

/// Event published for every processed job.
#[derive(Debug, Clone)]
pub struct CleanupEvent {
    pub job: CleanupJob,
    pub outcome: CleanupOutcome,
}

#[derive(Debug, Default)]
struct Counters {
    queued: AtomicU64,
    deleted: AtomicU64,
    missing: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time view of the queue counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupStats {
    pub queued: u64,
    pub deleted: u64,
    pub missing: u64,
    pub failed: u64,
}

impl CleanupStats {
    /// Jobs accepted but not yet processed.
    pub fn pending(&self) -> u64 {
        self.queued
            .saturating_sub(self.deleted + self.missing + self.failed)
    }
}

enum Message {
    Job(CleanupJob),
    Flush(oneshot::Sender<()>),
}

/// Handle to the cleanup worker. Cheap to clone.
#[derive(Clone)]
pub struct CleanupQueue {
    tx: mpsc::UnboundedSender<Message>,
    counters: Arc<Counters>,
    events: broadcast::Sender<CleanupEvent>,
}

impl CleanupQueue {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(store: ImageStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(256);
        let counters = Arc::new(Counters::default());

        tokio::spawn(run_worker(store, rx, counters.clone(), events.clone()));

        Self {
            tx,
            counters,
            events,
        }
    }

    /// Queues a single file for deletion.
    pub fn enqueue(&self, job: CleanupJob) {
        self.counters.queued.fetch_add(1, Ordering::Relaxed);
        if self.tx.send(Message::Job(job)).is_err() {
            // Worker is gone (runtime shutting down); account for it as a failure.
            self.counters.failed.fetch_add(1, Ordering::Relaxed);
            tracing::error!("Cleanup worker stopped; image cleanup job dropped");
        }
    }

    /// Queues every path with the same course id and reason.
    pub fn enqueue_all<I>(&self, course_id: i64, paths: I, reason: CleanupReason)
    where
        I: IntoIterator<Item = String>,
    {
        for path in paths {
            self.enqueue(CleanupJob {
                course_id,
                path,
                reason,
            });
        }
    }

    /// Resolves once every job queued before this call has been processed.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Message::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    pub fn stats(&self) -> CleanupStats {
        CleanupStats {
            queued: self.counters.queued.load(Ordering::Relaxed),
            deleted: self.counters.deleted.load(Ordering::Relaxed),
            missing: self.counters.missing.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Subscribes to outcomes of jobs processed from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CleanupEvent> {
        self.events.subscribe()
    }
}

async fn run_worker(
    store: ImageStore,
    mut rx: mpsc::UnboundedReceiver<Message>,
    counters: Arc<Counters>,
    events: broadcast::Sender<CleanupEvent>,
) {
    while let Some(message) = rx.recv().await {
        let job = match message {
            Message::Job(job) => job,
            Message::Flush(done) => {
                let _ = done.send(());
                continue;
            }
        };

        let outcome = match store.remove(&job.path).await {
            Ok(true) => {
                counters.deleted.fetch_add(1, Ordering::Relaxed);
                tracing::info!(course_id = job.course_id, path = %job.path, reason = ?job.reason, "Old image deleted");
                CleanupOutcome::Deleted
            }
            Ok(false) => {
                counters.missing.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(course_id = job.course_id, path = %job.path, "Image already absent");
                CleanupOutcome::Missing
            }
            Err(StorageError::InvalidPath(path)) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(course_id = job.course_id, %path, "Refusing to delete path outside uploads");
                CleanupOutcome::Rejected
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(course_id = job.course_id, path = %job.path, error = %e, "Failed to delete old image");
                CleanupOutcome::Failed(e.to_string())
            }
        };

        // No subscribers is fine.
        let _ = events.send(CleanupEvent { job, outcome });
    }

    tracing::debug!("Cleanup worker exiting");
}
