use folio_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsSendRequest, EmailJsSendResponse, EmailJsTemplateParams,
};
use folio_extern_impl::{
    emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
    http::HttpClient,
};
use folio_testing::emailjs::{EmailJsTestingState, SEND_ROUTE};
use tokio::net::TcpListener;

#[tokio::test]
async fn ok() {
    let sut = make_sut().await;
    let result = sut.send(make_request("service", "public-key")).await.unwrap();
    assert_eq!(result, EmailJsSendResponse::Ok);
}

#[tokio::test]
async fn invalid_service() {
    let sut = make_sut().await;
    let result = sut.send(make_request("other", "public-key")).await.unwrap();
    assert_eq!(
        result,
        EmailJsSendResponse::Rejected {
            status: 400,
            text: "The service ID is invalid".into()
        }
    );
}

#[tokio::test]
async fn invalid_public_key() {
    let sut = make_sut().await;
    let result = sut.send(make_request("service", "wrong")).await.unwrap();
    assert_eq!(
        result,
        EmailJsSendResponse::Rejected {
            status: 400,
            text: "The Public Key is invalid".into()
        }
    );
}

#[tokio::test]
async fn unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config =
        EmailJsApiServiceConfig::new(Some(format!("http://{addr}{SEND_ROUTE}").parse().unwrap()));
    let sut = EmailJsApiServiceImpl::new(HttpClient::new().unwrap(), config);

    sut.send(make_request("service", "public-key"))
        .await
        .unwrap_err();
}

fn make_request(service_id: &str, public_key: &str) -> EmailJsSendRequest {
    EmailJsSendRequest {
        service_id: service_id.into(),
        template_id: "template".into(),
        public_key: public_key.into(),
        access_token: None,
        template_params: EmailJsTemplateParams {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hi".into(),
            message: "This is a long enough message.".into(),
        },
    }
}

async fn make_sut() -> EmailJsApiServiceImpl {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = folio_testing::emailjs::router(EmailJsTestingState::default());
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let config =
        EmailJsApiServiceConfig::new(Some(format!("http://{addr}{SEND_ROUTE}").parse().unwrap()));
    EmailJsApiServiceImpl::new(HttpClient::new().unwrap(), config)
}
