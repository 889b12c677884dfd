//! State of the contact form: field values, validation errors and the
//! lifecycle of a submission.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use folio_core_contact_contracts::ContactService;
use folio_models::contact::{ContactField, ContactForm, ValidationErrorSet};
use tracing::{debug, warn};

pub use state::{FormView, SubmissionState, SubmitOutcome, FAILED_REASON};

mod state;

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFormConfig {
    /// How long the success view stays before the form is shown again.
    pub reset_delay: Duration,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

/// Controller of one contact form.
///
/// Submissions are not reentrant: while a message is being delivered, further
/// calls to [`submit`](Self::submit) return [`SubmitOutcome::Busy`].
#[derive(Debug)]
pub struct ContactFormController<Contact> {
    contact: Contact,
    config: ContactFormConfig,
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    form: ContactForm,
    errors: ValidationErrorSet,
    state: SubmissionState,
    /// Incremented on every successful submission, so a deferred reset only
    /// applies to the success that scheduled it.
    generation: u64,
    /// Set once the form is torn down. A pending reset is discarded.
    closed: bool,
}

impl<Contact> ContactFormController<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Contact, config: ContactFormConfig) -> Self {
        Self {
            contact,
            config,
            inner: Default::default(),
        }
    }

    pub fn form(&self) -> ContactForm {
        self.lock().form.clone()
    }

    pub fn errors(&self) -> ValidationErrorSet {
        self.lock().errors.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    /// Overwrites one field. Clears the error of that field, other errors stay
    /// untouched until the next validation.
    pub fn update_field(&self, field: ContactField, value: impl Into<String>) {
        let mut inner = self.lock();
        inner.form.set(field, value.into());
        inner.errors.remove(field);
    }

    /// Validates the current field values without touching any state.
    pub fn validate(&self) -> ValidationErrorSet {
        self.lock().form.validate()
    }

    /// Validates the form and, if it is valid, delivers it.
    pub async fn submit(&self) -> SubmitOutcome {
        let message = {
            let mut inner = self.lock();
            if inner.state == SubmissionState::Submitting {
                return SubmitOutcome::Busy;
            }

            match inner.form.to_message() {
                Ok(message) => {
                    inner.errors = ValidationErrorSet::default();
                    inner.state = SubmissionState::Submitting;
                    message
                }
                Err(errors) => {
                    inner.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let result = self.contact.send_message(message).await;

        let mut inner = self.lock();
        match result {
            Ok(()) => {
                inner.form.clear();
                inner.state = SubmissionState::Succeeded;
                inner.generation += 1;
                let generation = inner.generation;
                drop(inner);

                self.schedule_reset(generation);
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!("Failed to send contact message: {err}");
                inner.state = SubmissionState::Failed(FAILED_REASON);
                SubmitOutcome::Failed
            }
        }
    }

    /// Tears the form down. A pending reset after a successful submission is
    /// discarded, even if the controller is still shared.
    pub fn close(&self) {
        debug!("closing contact form");
        self.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn schedule_reset(&self, generation: u64) {
        let inner = Arc::downgrade(&self.inner);
        let delay = self.config.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            reset(&inner, generation);
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }
}

fn reset(inner: &Weak<Mutex<Inner>>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        debug!("contact form dropped before reset");
        return;
    };

    let mut inner = lock(&inner);
    if inner.closed {
        debug!("contact form closed before reset");
        return;
    }
    if inner.generation == generation && inner.state == SubmissionState::Succeeded {
        inner.state = SubmissionState::Idle;
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
