//! Client side of the course admin panel.
//!
//! [`CourseClient`] talks to the REST API. [`CourseForm`] is the edit screen's
//! state, advanced by pure transitions that return effects instead of
//! performing them. [`EditSession`] glues the two together.

pub mod client;
pub mod error;
pub mod form;
pub mod session;

pub use client::{CourseClient, CourseRecord, NewCourse};
pub use error::ClientError;
pub use form::{
    CourseForm, Effect, FormEvent, FormStatus, ImageSlot, PendingImage, Toast, ToastKind,
    Transition, UpdatePayload,
};
pub use session::EditSession;
