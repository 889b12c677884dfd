use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::contact::{ContactInfoLink, ContactMessage, ContactMessageFieldsError};
use tracing::{debug, warn};

use super::error;
use crate::models::{contact::ApiContactMessage, ApiOk};

pub fn router(
    service: Arc<impl ContactService>,
    info: Arc<Vec<ContactInfoLink>>,
) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
        .merge(
            Router::new()
                .route("/api/contact/info", routing::get(contact_info))
                .with_state(info),
        )
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Json<ApiContactMessage>, JsonRejection>,
) -> Response {
    let message = match body {
        Ok(Json(message)) => message,
        Err(rejection) => {
            debug!(%rejection, "rejecting contact request");
            return error(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let message = match ContactMessage::try_from(message) {
        Ok(message) => message,
        Err(ContactMessageFieldsError::Missing) => {
            return error(StatusCode::BAD_REQUEST, "Missing required fields");
        }
        Err(ContactMessageFieldsError::TooLong) => {
            return error(StatusCode::BAD_REQUEST, "Fields too long");
        }
    };

    match service.send_message(message).await {
        Ok(()) => Json(ApiOk { ok: true }).into_response(),
        Err(ContactSendMessageError::NotConfigured) => {
            warn!("contact message dropped, delivery is not configured");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SMTP not configured on server",
            )
        }
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
        Err(ContactSendMessageError::Other(err)) => {
            tracing::error!("failed to send contact message: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
    }
}

async fn contact_info(info: State<Arc<Vec<ContactInfoLink>>>) -> Response {
    Json(info.as_slice()).into_response()
}
