//! Edit-course form state.
//!
//! `Loading → Populated → Editing → Submitting → Succeeded`, with a failed
//! submit going back to `Editing` and a failed initial fetch ending in
//! `LoadFailed`. Every transition is a pure function of the current form and
//! one event; side effects come back as [`Effect`] values for the caller to run.

use crate::client::CourseRecord;
use bytes::Bytes;

pub const SUCCESS_ROUTE: &str = "/viewcourses";
pub const UPDATED_MESSAGE: &str = "Course updated successfully";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update course";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch course details";

/// A file picked in the form but not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl PendingImage {
    /// Content type is guessed from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first()
            .map(|m| m.essence_str().to_string());
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }
}

/// One entry of the form's image list, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// Already stored on the server; holds its storage path.
    Existing(String),
    Pending(PendingImage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Loading,
    LoadFailed,
    Populated,
    Editing,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    Loaded(CourseRecord),
    LoadFailed(String),
    SetName(String),
    SetDescription(String),
    SetInstructor(String),
    AddImage(PendingImage),
    /// Removes the slot at this index. Removing an existing image only drops it
    /// from the kept list; the server deletes the file on submit.
    RemoveImage(usize),
    Submit,
    SubmitSucceeded(CourseRecord),
    SubmitFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    fn success(message: &str) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.to_string(),
        }
    }
}

/// What the multipart PATCH request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePayload {
    pub course_id: i64,
    pub name: String,
    pub description: String,
    pub instructor: String,
    /// Kept storage paths, in the order they appear in the form.
    pub existing_images: Vec<String>,
    pub new_files: Vec<PendingImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Toast(Toast),
    Navigate(String),
    Submit(UpdatePayload),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub form: CourseForm,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(form: CourseForm) -> Self {
        Self {
            form,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseForm {
    pub course_id: i64,
    pub status: FormStatus,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub images: Vec<ImageSlot>,
}

impl CourseForm {
    /// Empty form waiting for the course to load.
    pub fn loading(course_id: i64) -> Self {
        Self {
            course_id,
            status: FormStatus::Loading,
            name: String::new(),
            description: String::new(),
            instructor: String::new(),
            images: Vec::new(),
        }
    }

    pub fn existing_images(&self) -> Vec<String> {
        self.images
            .iter()
            .filter_map(|slot| match slot {
                ImageSlot::Existing(path) => Some(path.clone()),
                ImageSlot::Pending(_) => None,
            })
            .collect()
    }

    pub fn pending_images(&self) -> Vec<PendingImage> {
        self.images
            .iter()
            .filter_map(|slot| match slot {
                ImageSlot::Pending(image) => Some(image.clone()),
                ImageSlot::Existing(_) => None,
            })
            .collect()
    }

    pub fn payload(&self) -> UpdatePayload {
        UpdatePayload {
            course_id: self.course_id,
            name: self.name.clone(),
            description: self.description.clone(),
            instructor: self.instructor.clone(),
            existing_images: self.existing_images(),
            new_files: self.pending_images(),
        }
    }

    fn populate(mut self, record: CourseRecord) -> Self {
        self.course_id = record.id;
        self.name = record.name;
        self.description = record.description;
        self.instructor = record.instructor;
        self.images = record.images.into_iter().map(ImageSlot::Existing).collect();
        self
    }

    fn is_editable(&self) -> bool {
        matches!(self.status, FormStatus::Populated | FormStatus::Editing)
    }

    pub fn apply(self, event: FormEvent) -> Transition {
        match (self.status, event) {
            (FormStatus::Loading, FormEvent::Loaded(record)) => {
                let mut form = self.populate(record);
                form.status = FormStatus::Populated;
                Transition::quiet(form)
            }
            (FormStatus::Loading, FormEvent::LoadFailed(reason)) => {
                tracing::warn!(course_id = self.course_id, %reason, "Course fetch failed");
                let mut form = self;
                form.status = FormStatus::LoadFailed;
                Transition {
                    form,
                    effects: vec![Effect::Toast(Toast::error(LOAD_FAILED_MESSAGE))],
                }
            }

            (_, FormEvent::SetName(value)) if self.is_editable() => self.edit(|f| f.name = value),
            (_, FormEvent::SetDescription(value)) if self.is_editable() => {
                self.edit(|f| f.description = value)
            }
            (_, FormEvent::SetInstructor(value)) if self.is_editable() => self.edit(|f| f.instructor = value),
            (_, FormEvent::AddImage(image)) if self.is_editable() => {
                self.edit(|f| f.images.push(ImageSlot::Pending(image)))
            }
            (_, FormEvent::RemoveImage(index)) if self.is_editable() => self.edit(|f| {
                if index < f.images.len() {
                    f.images.remove(index);
                }
            }),

            (_, FormEvent::Submit) if self.is_editable() => {
                let payload = self.payload();
                let mut form = self;
                form.status = FormStatus::Submitting;
                Transition {
                    form,
                    effects: vec![Effect::Submit(payload)],
                }
            }
            (FormStatus::Submitting, FormEvent::SubmitSucceeded(record)) => {
                let mut form = self.populate(record);
                form.status = FormStatus::Succeeded;
                Transition {
                    form,
                    effects: vec![
                        Effect::Toast(Toast::success(UPDATED_MESSAGE)),
                        Effect::Navigate(SUCCESS_ROUTE.to_string()),
                    ],
                }
            }
            (FormStatus::Submitting, FormEvent::SubmitFailed(reason)) => {
                tracing::warn!(course_id = self.course_id, %reason, "Course update failed");
                let mut form = self;
                form.status = FormStatus::Editing;
                Transition {
                    form,
                    effects: vec![Effect::Toast(Toast::error(UPDATE_FAILED_MESSAGE))],
                }
            }

            (status, event) => {
                tracing::debug!(?status, ?event, "Ignoring form event");
                Transition::quiet(self)
            }
        }
    }

    fn edit(self, change: impl FnOnce(&mut Self)) -> Transition {
        let mut form = self;
        change(&mut form);
        form.status = FormStatus::Editing;
        Transition::quiet(form)
    }
}
