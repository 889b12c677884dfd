use folio_models::contact::ValidationErrorSet;

/// The only message shown to users when a delivery fails.
pub const FAILED_REASON: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(&'static str),
}

/// What the contact section renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormView {
    Form,
    Success,
}

impl SubmissionState {
    pub fn is_submit_enabled(self) -> bool {
        self != Self::Submitting
    }

    pub fn view(self) -> FormView {
        match self {
            Self::Succeeded => FormView::Success,
            Self::Idle | Self::Submitting | Self::Failed(_) => FormView::Form,
        }
    }

    /// The inline error below the form, if any.
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent.
    Invalid(ValidationErrorSet),
    /// A submission is already in flight.
    Busy,
    Sent,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_enabled() {
        assert!(SubmissionState::Idle.is_submit_enabled());
        assert!(!SubmissionState::Submitting.is_submit_enabled());
        assert!(SubmissionState::Succeeded.is_submit_enabled());
        assert!(SubmissionState::Failed(FAILED_REASON).is_submit_enabled());
    }

    #[test]
    fn view() {
        assert_eq!(SubmissionState::Idle.view(), FormView::Form);
        assert_eq!(SubmissionState::Submitting.view(), FormView::Form);
        assert_eq!(SubmissionState::Succeeded.view(), FormView::Success);
        assert_eq!(SubmissionState::Failed(FAILED_REASON).view(), FormView::Form);
    }

    #[test]
    fn error_message() {
        assert_eq!(SubmissionState::Idle.error_message(), None);
        assert_eq!(
            SubmissionState::Failed(FAILED_REASON).error_message(),
            Some("Failed to send message. Please try again.")
        );
    }
}
