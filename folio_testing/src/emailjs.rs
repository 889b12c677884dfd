use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// Credentials the fake EmailJS api accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsTestingState {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for EmailJsTestingState {
    fn default() -> Self {
        Self {
            service_id: "service".into(),
            template_id: "template".into(),
            public_key: "public-key".into(),
        }
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    state: EmailJsTestingState,
) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("EmailJS send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Accepted credentials: {state:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

pub fn router(state: EmailJsTestingState) -> Router<()> {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(Arc::new(state))
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: TemplateParams,
}

#[derive(Deserialize)]
struct TemplateParams {
    name: String,
    email: String,
    subject: String,
    message: String,
}

async fn send(
    state: State<Arc<EmailJsTestingState>>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    if request.user_id != state.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }
    if request.service_id != state.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }
    if request.template_id != state.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID is invalid");
    }

    let TemplateParams {
        name,
        email,
        subject,
        message,
    } = request.template_params;
    info!(%name, %email, %subject, message_len = message.len(), "accepted email");

    (StatusCode::OK, "OK")
}
