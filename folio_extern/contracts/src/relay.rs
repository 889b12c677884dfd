use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RelayApiService: Send + Sync + 'static {
    /// Submit a message to the contact relay endpoint of the folio server.
    fn send(
        &self,
        request: RelayRequest,
    ) -> impl Future<Output = anyhow::Result<RelayResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResponse {
    Ok,
    Error { status: u16, error: Option<String> },
}

#[cfg(feature = "mock")]
impl MockRelayApiService {
    pub fn with_send(mut self, request: RelayRequest, result: RelayResponse) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, request: RelayRequest, error: anyhow::Error) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }
}
