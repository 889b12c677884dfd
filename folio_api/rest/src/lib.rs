use std::{net::IpAddr, sync::Arc};

use axum::Router;
use folio_core_contact_contracts::ContactService;
use folio_models::contact::ContactInfoLink;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

pub use middlewares::request_id::REQUEST_ID_HEADER;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Origins allowed to call the api from a browser. Empty allows any.
    pub allowed_origins: Vec<String>,
    pub contact_info: Arc<Vec<ContactInfoLink>>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Contact, config: RestServerConfig) -> Self {
        Self { contact, config }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let Self { contact, config } = self;

        let router = Router::new()
            .merge(routes::contact::router(contact.into(), config.contact_info))
            .fallback(routes::not_found);

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(&config.allowed_origins)(router)
    }
}
