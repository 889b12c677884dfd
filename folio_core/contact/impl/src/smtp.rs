use std::sync::Arc;

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_email_contracts::{Email, EmailBody, EmailService};
use folio_models::{contact::ContactMessage, email_address::EmailAddressWithName};
use folio_templates_contracts::{ContactHtmlTemplate, ContactTextTemplate, TemplateService};
use tracing::warn;

/// Relays contact messages to the site owner through the outbound smtp relay.
#[derive(Debug, Clone)]
pub struct ContactSmtpServiceImpl<Email, Template> {
    /// `None` if the smtp relay is not configured.
    email: Option<Email>,
    template: Template,
    config: ContactSmtpServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactSmtpServiceConfig {
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Email, Template> ContactSmtpServiceImpl<Email, Template> {
    pub fn new(email: Option<Email>, template: Template, config: ContactSmtpServiceConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, Template> ContactService for ContactSmtpServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    #[tracing::instrument(skip_all)]
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        let Some(email_service) = &self.email else {
            return Err(ContactSendMessageError::NotConfigured);
        };

        let name = message.author.name.as_str();
        let email = message.author.email.as_str();

        let text = self.template.render(&ContactTextTemplate {
            name: name.into(),
            email: email.into(),
            message: message.content.as_str().into(),
        })?;
        let html = self.template.render(&ContactHtmlTemplate {
            name: name.into(),
            email: email.into(),
            subject: message.subject.as_str().into(),
            lines: message.content.split('\n').map(Into::into).collect(),
        })?;

        let reply_to = message.author.email.parse_address();
        if reply_to.is_none() {
            warn!(email, "author email is not a valid address, omitting reply-to");
        }

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("[Portfolio] {}", message.subject.as_str()),
            body: EmailBody::Alternative { text, html },
            reply_to: reply_to.map(|address| address.with_name(name.into())),
        };

        if !email_service.send(email).await? {
            warn!("smtp server rejected the contact message");
            return Err(ContactSendMessageError::Send);
        }

        Ok(())
    }
}
