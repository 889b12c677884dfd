use std::future::Future;

use folio_models::contact::ContactMessage;
use thiserror::Error;

/// Hands a validated contact message to a delivery provider.
///
/// Expected failures (missing configuration, unreachable provider) resolve to
/// an error instead of panicking. Error details are meant for logs only.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    fn send_message(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Message delivery is not configured.")]
    NotConfigured,
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        message: ContactMessage,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn without_send_message(mut self) -> Self {
        self.expect_send_message().never();
        self
    }
}
