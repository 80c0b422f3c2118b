use crate::client::CourseClient;
use crate::form::{CourseForm, Effect, FormEvent, FormStatus};

/// Drives a [`CourseForm`] against a live [`CourseClient`].
///
/// Network effects (`Submit`) are run here and their result fed back into the
/// form; UI effects (toasts, navigation) are handed back to the caller.
pub struct EditSession {
    client: CourseClient,
    form: CourseForm,
}

impl EditSession {
    /// Fetches the course and returns the session in `Populated`, or in
    /// `LoadFailed` with an error toast.
    pub async fn open(client: CourseClient, course_id: i64) -> (Self, Vec<Effect>) {
        let event = match client.fetch(course_id).await {
            Ok(Some(course)) => FormEvent::Loaded(course),
            Ok(None) => FormEvent::LoadFailed(format!("course {course_id} not found")),
            Err(e) => FormEvent::LoadFailed(e.to_string()),
        };

        let mut session = Self {
            client,
            form: CourseForm::loading(course_id),
        };
        let effects = session.dispatch(event).await;
        (session, effects)
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
    }

    pub fn status(&self) -> FormStatus {
        self.form.status
    }

    /// Applies one event, running any submit it triggers to completion.
    pub async fn dispatch(&mut self, event: FormEvent) -> Vec<Effect> {
        let mut pending = vec![event];
        let mut ui_effects = Vec::new();

        while let Some(event) = pending.pop() {
            let form = std::mem::replace(&mut self.form, CourseForm::loading(0));
            let transition = form.apply(event);
            self.form = transition.form;

            for effect in transition.effects {
                match effect {
                    Effect::Submit(payload) => {
                        let outcome = match self.client.submit(&payload).await {
                            Ok(course) => FormEvent::SubmitSucceeded(course),
                            Err(e) => FormEvent::SubmitFailed(e.to_string()),
                        };
                        pending.push(outcome);
                    }
                    other => ui_effects.push(other),
                }
            }
        }

        ui_effects
    }
}
