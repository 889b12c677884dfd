use anyhow::bail;
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_contracts::ContactService;
use folio_form::{ContactFormController, SubmitOutcome, FAILED_REASON};
use folio_models::contact::ContactField;
use url::Url;

use crate::environment::ConfigProvider;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Fill in the contact form and submit it to the relay endpoint
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Relay endpoint to submit to instead of the configured one
        #[arg(long)]
        endpoint: Option<Url>,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                subject,
                message,
                endpoint,
            } => {
                let config_provider = ConfigProvider::new(&config)?;
                let form = ContactFormController::new(
                    config_provider.contact_relay(endpoint)?,
                    config_provider.contact_form_config(),
                );

                form.update_field(ContactField::Name, name);
                form.update_field(ContactField::Email, email);
                form.update_field(ContactField::Subject, subject);
                form.update_field(ContactField::Message, message);

                send(form).await
            }
        }
    }
}

async fn send(form: ContactFormController<impl ContactService>) -> anyhow::Result<()> {
    let outcome = form.submit().await;
    form.close();

    match outcome {
        SubmitOutcome::Sent => {
            println!("Message sent");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, error) in errors.iter() {
                eprintln!("{field}: {error}");
            }
            bail!("The contact form is invalid")
        }
        SubmitOutcome::Failed => bail!(FAILED_REASON),
        SubmitOutcome::Busy => bail!("A message is already being sent"),
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::Arc};

    use folio_api_rest::{RestServer, RestServerConfig};
    use folio_config::DEFAULT_CONFIG_PATH;
    use folio_core_contact_impl::{ContactLogServiceImpl, ContactServiceImpl};
    use tokio::net::TcpListener;

    use super::*;
    use crate::environment::types::Contact;

    #[tokio::test]
    async fn send_through_relay() {
        // Arrange
        let endpoint = start_relay().await;
        let config = load_config();

        // Act
        let result = ContactCommand::Send {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hi".into(),
            message: "This is a long enough message.".into(),
            endpoint: Some(endpoint),
        }
        .invoke(config)
        .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        // Arrange
        let config = load_config();

        // Act
        let result = ContactCommand::Send {
            name: "Jo".into(),
            email: "jo@x".into(),
            subject: "Hi".into(),
            message: "short".into(),
            endpoint: Some("http://127.0.0.1:1/api/contact".parse().unwrap()),
        }
        .invoke(config)
        .await;

        // Assert
        assert_eq!(
            result.unwrap_err().to_string(),
            "The contact form is invalid"
        );
    }

    #[tokio::test]
    async fn unreachable_relay() {
        // Arrange
        let config = load_config();

        // Act
        let result = ContactCommand::Send {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hi".into(),
            message: "This is a long enough message.".into(),
            endpoint: Some("http://127.0.0.1:1/api/contact".parse().unwrap()),
        }
        .invoke(config)
        .await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), FAILED_REASON);
    }

    fn load_config() -> Config {
        folio_config::load_paths(&[Path::new(DEFAULT_CONFIG_PATH)], false).unwrap()
    }

    async fn start_relay() -> Url {
        let contact: Contact = ContactServiceImpl::Log(ContactLogServiceImpl);
        let router = RestServer::new(
            contact,
            RestServerConfig {
                allowed_origins: Vec::new(),
                contact_info: Arc::new(Vec::new()),
            },
        )
        .router();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });

        format!("http://{addr}/api/contact").parse().unwrap()
    }
}
