use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::contact::ContactMessage;
use tracing::info;

/// Acknowledges every message without delivering it. Only meant for local
/// development.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactLogServiceImpl;

impl ContactService for ContactLogServiceImpl {
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        info!(
            name = %message.author.name.as_str(),
            email = %message.author.email.as_str(),
            subject = %message.subject.as_str(),
            content = %message.content.as_str(),
            "contact message accepted without delivery"
        );
        Ok(())
    }
}
