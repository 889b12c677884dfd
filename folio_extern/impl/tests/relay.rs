use std::sync::Arc;

use axum::{http::StatusCode, routing, Json, Router};
use folio_extern_contracts::relay::{RelayApiService, RelayRequest, RelayResponse};
use folio_extern_impl::{
    http::HttpClient,
    relay::{RelayApiServiceConfig, RelayApiServiceImpl},
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[tokio::test]
async fn ok() {
    let sut = make_sut().await;
    let result = sut.send(make_request("Hi")).await.unwrap();
    assert_eq!(result, RelayResponse::Ok);
}

#[tokio::test]
async fn missing_fields() {
    let sut = make_sut().await;
    let result = sut.send(make_request("")).await.unwrap();
    assert_eq!(
        result,
        RelayResponse::Error {
            status: 400,
            error: Some("Missing required fields".into())
        }
    );
}

#[tokio::test]
async fn not_configured() {
    let sut = make_sut().await;
    let result = sut.send(make_request("unconfigured")).await.unwrap();
    assert_eq!(
        result,
        RelayResponse::Error {
            status: 500,
            error: Some("SMTP not configured on server".into())
        }
    );
}

#[tokio::test]
async fn error_without_body() {
    let sut = make_sut().await;
    let result = sut.send(make_request("teapot")).await.unwrap();
    assert_eq!(
        result,
        RelayResponse::Error {
            status: 418,
            error: None
        }
    );
}

fn make_request(subject: &str) -> RelayRequest {
    RelayRequest {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        subject: subject.into(),
        message: "This is a long enough message.".into(),
    }
}

/// Minimal stand-in for the relay endpoint that answers based on the subject.
async fn relay(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match body["subject"].as_str() {
        Some("") | None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields" })),
        ),
        Some("unconfigured") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "SMTP not configured on server" })),
        ),
        Some("teapot") => (StatusCode::IM_A_TEAPOT, Json(Value::Null)),
        Some(_) => (StatusCode::OK, Json(json!({ "ok": true }))),
    }
}

async fn make_sut() -> RelayApiServiceImpl {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().route("/api/contact", routing::post(relay));
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let config = RelayApiServiceConfig {
        endpoint: Arc::new(format!("http://{addr}/api/contact").parse().unwrap()),
    };
    RelayApiServiceImpl::new(HttpClient::new().unwrap(), config)
}
