use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailJsApiService: Send + Sync + 'static {
    /// Ask EmailJS to render `template_id` with the given parameters and send
    /// it through `service_id`.
    fn send(
        &self,
        request: EmailJsSendRequest,
    ) -> impl Future<Output = anyhow::Result<EmailJsSendResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsSendRequest {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    pub template_params: EmailJsTemplateParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsTemplateParams {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailJsSendResponse {
    Ok,
    /// EmailJS answered with a non-success status. `text` is the raw
    /// response body and must not be shown to end users.
    Rejected { status: u16, text: String },
}

#[cfg(feature = "mock")]
impl MockEmailJsApiService {
    pub fn with_send(mut self, request: EmailJsSendRequest, result: EmailJsSendResponse) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
