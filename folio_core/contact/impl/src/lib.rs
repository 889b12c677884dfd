use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_email_contracts::EmailService;
use folio_extern_contracts::emailjs::EmailJsApiService;
use folio_models::contact::ContactMessage;
use folio_templates_contracts::TemplateService;

pub mod emailjs;
pub mod log;
pub mod relay;
pub mod smtp;

pub use emailjs::{ContactEmailJsServiceConfig, ContactEmailJsServiceImpl};
pub use log::ContactLogServiceImpl;
pub use relay::ContactRelayServiceImpl;
pub use smtp::{ContactSmtpServiceConfig, ContactSmtpServiceImpl};

/// The delivery backend selected by configuration.
#[derive(Debug, Clone)]
pub enum ContactServiceImpl<Email, Template, EmailJsApi> {
    Smtp(ContactSmtpServiceImpl<Email, Template>),
    EmailJs(ContactEmailJsServiceImpl<EmailJsApi>),
    Log(ContactLogServiceImpl),
}

impl<Email, Template, EmailJsApi> ContactService for ContactServiceImpl<Email, Template, EmailJsApi>
where
    Email: EmailService,
    Template: TemplateService,
    EmailJsApi: EmailJsApiService,
{
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        match self {
            Self::Smtp(smtp) => smtp.send_message(message).await,
            Self::EmailJs(emailjs) => emailjs.send_message(message).await,
            Self::Log(log) => log.send_message(message).await,
        }
    }
}
