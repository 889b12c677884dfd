use std::sync::Arc;

use folio_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsSendRequest, EmailJsSendResponse, EmailJsTemplateParams,
};
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    pub fn new(endpoint_override: Option<Url>) -> Self {
        Self {
            send_endpoint: endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

impl EmailJsApiServiceImpl {
    pub fn new(client: HttpClient, config: EmailJsApiServiceConfig) -> Self {
        Self { config, client }
    }
}

impl EmailJsApiService for EmailJsApiServiceImpl {
    #[tracing::instrument(skip_all, fields(service_id = %request.service_id))]
    async fn send(&self, request: EmailJsSendRequest) -> anyhow::Result<EmailJsSendResponse> {
        let response = self
            .client
            .post((*self.config.send_endpoint).clone())
            .json(&SendRequest::from(&request))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(EmailJsSendResponse::Ok);
        }

        let text = response.text().await.unwrap_or_default();
        Ok(EmailJsSendResponse::Rejected {
            status: status.as_u16(),
            text,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl<'a> From<&'a EmailJsSendRequest> for SendRequest<'a> {
    fn from(value: &'a EmailJsSendRequest) -> Self {
        let EmailJsTemplateParams {
            name,
            email,
            subject,
            message,
        } = &value.template_params;

        Self {
            service_id: &value.service_id,
            template_id: &value.template_id,
            user_id: &value.public_key,
            access_token: value.access_token.as_deref(),
            template_params: TemplateParams {
                name,
                email,
                subject,
                message,
            },
        }
    }
}
