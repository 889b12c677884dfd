use std::sync::Arc;

use folio_api_rest::RestServerConfig;
use folio_config::{Config, DeliveryBackend};
use folio_core_contact_impl::{
    ContactEmailJsServiceConfig, ContactEmailJsServiceImpl, ContactLogServiceImpl,
    ContactRelayServiceImpl, ContactServiceImpl, ContactSmtpServiceConfig, ContactSmtpServiceImpl,
};
use folio_extern_impl::{
    emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
    http::HttpClient,
    relay::{RelayApiServiceConfig, RelayApiServiceImpl},
};
use folio_form::ContactFormConfig;
use folio_templates_impl::TemplateServiceImpl;
use tracing::warn;
use types::{Contact, ContactRelay, Email, RestServer};
use url::Url;

pub mod types;

/// Builds the services of the application from the configuration.
pub struct Provider {
    config: ConfigProvider,
    /// `None` unless the smtp backend is selected and configured.
    email: Option<Email>,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Option<Email>) -> Self {
        Self { config, email }
    }

    pub fn rest_server(self) -> anyhow::Result<RestServer> {
        let rest_server_config = self.config.rest_server_config.clone();
        let contact = self.contact()?;
        Ok(RestServer::new(contact, rest_server_config))
    }

    pub fn contact(self) -> anyhow::Result<Contact> {
        let Self { config, email } = self;

        Ok(match config.delivery {
            DeliveryBackend::Smtp => ContactServiceImpl::Smtp(ContactSmtpServiceImpl::new(
                email,
                TemplateServiceImpl::new()?,
                config.contact_smtp_service_config,
            )),
            DeliveryBackend::EmailJs => {
                let api = EmailJsApiServiceImpl::new(
                    HttpClient::new()?,
                    config.emailjs_api_service_config,
                );
                ContactServiceImpl::EmailJs(ContactEmailJsServiceImpl::new(
                    api,
                    config.contact_emailjs_service_config,
                ))
            }
            DeliveryBackend::Log => ContactServiceImpl::Log(ContactLogServiceImpl),
        })
    }
}

/// Configuration of the individual services, derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    delivery: DeliveryBackend,

    // API
    rest_server_config: RestServerConfig,

    // Extern
    emailjs_api_service_config: EmailJsApiServiceConfig,
    relay_api_service_config: RelayApiServiceConfig,

    // Core
    contact_smtp_service_config: ContactSmtpServiceConfig,
    contact_emailjs_service_config: Option<ContactEmailJsServiceConfig>,
    contact_form_config: ContactFormConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let delivery = config.contact.delivery;
        match delivery {
            DeliveryBackend::Smtp if config.smtp.is_none() => {
                warn!("smtp delivery selected without an [smtp] section, messages will be rejected")
            }
            DeliveryBackend::EmailJs if config.emailjs.is_none() => {
                warn!(
                    "emailjs delivery selected without an [emailjs] section, \
                     messages will be rejected"
                )
            }
            DeliveryBackend::Log => {
                warn!("log delivery selected, contact messages are not delivered")
            }
            _ => {}
        }

        // API
        let rest_server_config = RestServerConfig {
            allowed_origins: config.http.allowed_origins.clone(),
            contact_info: config.contact.info.clone().into(),
        };

        // Extern
        let emailjs_api_service_config = EmailJsApiServiceConfig::new(
            config
                .emailjs
                .as_ref()
                .and_then(|emailjs| emailjs.endpoint_override.clone()),
        );

        let relay_api_service_config = RelayApiServiceConfig {
            endpoint: config.contact.relay_endpoint.clone().into(),
        };

        // Core
        let contact_smtp_service_config = ContactSmtpServiceConfig {
            recipient: config.contact.recipient.clone().into(),
        };

        let contact_emailjs_service_config =
            config
                .emailjs
                .as_ref()
                .map(|emailjs| ContactEmailJsServiceConfig {
                    service_id: emailjs.service_id.clone(),
                    template_id: emailjs.template_id.clone(),
                    public_key: emailjs.public_key.clone(),
                    access_token: emailjs.access_token.clone(),
                });

        let contact_form_config = ContactFormConfig {
            reset_delay: config.contact.reset_delay.into(),
        };

        Ok(Self {
            delivery,
            rest_server_config,
            emailjs_api_service_config,
            relay_api_service_config,
            contact_smtp_service_config,
            contact_emailjs_service_config,
            contact_form_config,
        })
    }

    pub fn contact_form_config(&self) -> ContactFormConfig {
        self.contact_form_config
    }

    /// The client side of the relay endpoint, optionally pointed at another
    /// server than the configured one.
    pub fn contact_relay(&self, endpoint: Option<Url>) -> anyhow::Result<ContactRelay> {
        let config = match endpoint {
            Some(endpoint) => RelayApiServiceConfig {
                endpoint: Arc::new(endpoint),
            },
            None => self.relay_api_service_config.clone(),
        };
        let api = RelayApiServiceImpl::new(HttpClient::new()?, config);
        Ok(ContactRelayServiceImpl::new(api))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_config::DEFAULT_CONFIG_PATH;

    use super::*;

    #[test]
    fn provide_rest_server() {
        let config = folio_config::load_paths(&[Path::new(DEFAULT_CONFIG_PATH)], false).unwrap();
        let config_provider = ConfigProvider::new(&config).unwrap();
        let provider = Provider::new(config_provider, None);

        provider.rest_server().unwrap();
    }

    #[test]
    fn provide_each_backend() {
        let mut config =
            folio_config::load_paths(&[Path::new(DEFAULT_CONFIG_PATH)], false).unwrap();

        for (delivery, expected) in [
            (DeliveryBackend::Smtp, "Smtp"),
            (DeliveryBackend::EmailJs, "EmailJs"),
            (DeliveryBackend::Log, "Log"),
        ] {
            config.contact.delivery = delivery;
            let config_provider = ConfigProvider::new(&config).unwrap();

            let contact = Provider::new(config_provider, None).contact().unwrap();

            assert!(format!("{contact:?}").starts_with(expected));
        }
    }

    #[test]
    fn provide_contact_relay() {
        let config = folio_config::load_paths(&[Path::new(DEFAULT_CONFIG_PATH)], false).unwrap();
        let config_provider = ConfigProvider::new(&config).unwrap();

        config_provider.contact_relay(None).unwrap();
        config_provider
            .contact_relay(Some("http://127.0.0.1:1/api/contact".parse().unwrap()))
            .unwrap();
    }
}
