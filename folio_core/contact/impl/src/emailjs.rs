use std::sync::Arc;

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsSendRequest, EmailJsSendResponse, EmailJsTemplateParams,
};
use folio_models::contact::ContactMessage;
use tracing::warn;

/// Delivers contact messages through the EmailJS transactional email api.
#[derive(Debug, Clone)]
pub struct ContactEmailJsServiceImpl<EmailJsApi> {
    api: EmailJsApi,
    /// `None` if EmailJS credentials are not configured.
    config: Option<Arc<ContactEmailJsServiceConfig>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmailJsServiceConfig {
    pub service_id: String,
    pub template_id: String,
    /// Public key of the EmailJS account. Not a secret.
    pub public_key: String,
    /// Private key, required if the account enforces it for api calls.
    pub access_token: Option<String>,
}

impl<EmailJsApi> ContactEmailJsServiceImpl<EmailJsApi> {
    pub fn new(api: EmailJsApi, config: Option<ContactEmailJsServiceConfig>) -> Self {
        Self {
            api,
            config: config.map(Arc::new),
        }
    }
}

impl<EmailJsApi> ContactService for ContactEmailJsServiceImpl<EmailJsApi>
where
    EmailJsApi: EmailJsApiService,
{
    #[tracing::instrument(skip_all)]
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        let Some(config) = &self.config else {
            return Err(ContactSendMessageError::NotConfigured);
        };

        let request = EmailJsSendRequest {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            access_token: config.access_token.clone(),
            template_params: EmailJsTemplateParams {
                name: message.author.name.into_inner(),
                email: message.author.email.into_inner(),
                subject: message.subject.into_inner(),
                message: message.content.into_inner(),
            },
        };

        match self.api.send(request).await? {
            EmailJsSendResponse::Ok => Ok(()),
            EmailJsSendResponse::Rejected { status, text } => {
                warn!(status, %text, "EmailJS rejected the message");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_extern_contracts::emailjs::MockEmailJsApiService;
    use folio_utils::assert_matches;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let api = MockEmailJsApiService::new().with_send(make_request(), EmailJsSendResponse::Ok);
        let sut = ContactEmailJsServiceImpl::new(api, Some(make_config()));

        // Act
        let result = sut.send_message(make_message()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let api = MockEmailJsApiService::new().with_send(
            make_request(),
            EmailJsSendResponse::Rejected {
                status: 400,
                text: "The template ID is invalid".into(),
            },
        );
        let sut = ContactEmailJsServiceImpl::new(api, Some(make_config()));

        // Act
        let result = sut.send_message(make_message()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Send));
    }

    #[tokio::test]
    async fn network_error() {
        // Arrange
        let mut api = MockEmailJsApiService::new();
        api.expect_send()
            .once()
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow::anyhow!("timeout")))));
        let sut = ContactEmailJsServiceImpl::new(api, Some(make_config()));

        // Act
        let result = sut.send_message(make_message()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Other(_)));
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let mut api = MockEmailJsApiService::new();
        api.expect_send().never();
        let sut = ContactEmailJsServiceImpl::new(api, None);

        // Act
        let result = sut.send_message(make_message()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::NotConfigured));
    }

    fn make_config() -> ContactEmailJsServiceConfig {
        ContactEmailJsServiceConfig {
            service_id: "service".into(),
            template_id: "template".into(),
            public_key: "public-key".into(),
            access_token: None,
        }
    }

    fn make_message() -> ContactMessage {
        ContactMessage::from_fields("Jo", "jo@x.com", "Hi", "This is a long enough message.")
            .unwrap()
    }

    fn make_request() -> EmailJsSendRequest {
        EmailJsSendRequest {
            service_id: "service".into(),
            template_id: "template".into(),
            public_key: "public-key".into(),
            access_token: None,
            template_params: EmailJsTemplateParams {
                name: "Jo".into(),
                email: "jo@x.com".into(),
                subject: "Hi".into(),
                message: "This is a long enough message.".into(),
            },
        }
    }
}
