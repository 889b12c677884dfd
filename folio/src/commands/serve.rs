use folio_config::{Config, DeliveryBackend};
use folio_email_contracts::EmailService;
use tracing::info;

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = match (config.contact.delivery, &config.smtp) {
        (DeliveryBackend::Smtp, Some(smtp)) => {
            info!("Connecting to smtp server");
            let email = email::connect(smtp)?;
            email.ping().await?;
            Some(email)
        }
        _ => None,
    };

    let config_provider = ConfigProvider::new(&config)?;
    let server = Provider::new(config_provider, email).rest_server()?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
