use std::sync::Arc;

use folio_extern_contracts::relay::{RelayApiService, RelayRequest, RelayResponse};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct RelayApiServiceImpl {
    config: RelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct RelayApiServiceConfig {
    /// Full url of the `POST /api/contact` endpoint.
    pub endpoint: Arc<Url>,
}

impl RelayApiServiceImpl {
    pub fn new(client: HttpClient, config: RelayApiServiceConfig) -> Self {
        Self { config, client }
    }
}

impl RelayApiService for RelayApiServiceImpl {
    #[tracing::instrument(skip_all, fields(endpoint = %self.config.endpoint))]
    async fn send(&self, request: RelayRequest) -> anyhow::Result<RelayResponse> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SendRequest {
                name: &request.name,
                email: &request.email,
                subject: &request.subject,
                message: &request.message,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(RelayResponse::Ok);
        }

        let error = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error);

        Ok(RelayResponse::Error {
            status: status.as_u16(),
            error,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}
