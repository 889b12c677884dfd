use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_extern_contracts::relay::{RelayApiService, RelayRequest, RelayResponse};
use folio_models::contact::ContactMessage;
use tracing::warn;

/// Error the relay endpoint reports when its smtp relay is not configured.
const NOT_CONFIGURED_ERROR: &str = "SMTP not configured on server";

/// Submits contact messages to the relay endpoint of a folio server, the way
/// the browser client does.
#[derive(Debug, Clone)]
pub struct ContactRelayServiceImpl<RelayApi> {
    api: RelayApi,
}

impl<RelayApi> ContactRelayServiceImpl<RelayApi> {
    pub fn new(api: RelayApi) -> Self {
        Self { api }
    }
}

impl<RelayApi> ContactService for ContactRelayServiceImpl<RelayApi>
where
    RelayApi: RelayApiService,
{
    #[tracing::instrument(skip_all)]
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        let request = RelayRequest {
            name: message.author.name.into_inner(),
            email: message.author.email.into_inner(),
            subject: message.subject.into_inner(),
            message: message.content.into_inner(),
        };

        match self.api.send(request).await? {
            RelayResponse::Ok => Ok(()),
            RelayResponse::Error { status: 500, error }
                if error.as_deref() == Some(NOT_CONFIGURED_ERROR) =>
            {
                Err(ContactSendMessageError::NotConfigured)
            }
            RelayResponse::Error { status, error } => {
                warn!(status, ?error, "relay endpoint rejected the message");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}
