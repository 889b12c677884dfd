use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::{
    contact::ContactInfoLink,
    email_address::{EmailAddress, EmailAddressWithName},
};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG";

/// Prefix of environment variables overriding single options, e.g.
/// `FOLIO__SMTP__HOST`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Load the default config, the files listed in `FOLIO_CONFIG` and the
/// `FOLIO__*` environment variables, in that order.
pub fn load() -> anyhow::Result<Config> {
    let extra = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra.split(':').filter(|path| !path.is_empty()))
        .collect::<Vec<_>>();
    load_paths(&paths, true)
}

/// Load and merge the given config files. Later files take precedence.
pub fn load_paths(paths: &[impl AsRef<Path>], environment: bool) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = if environment {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    } else {
        builder
    };

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub smtp: Option<SmtpConfig>,
    pub emailjs: Option<EmailJsConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Origins allowed to call the api from a browser. Empty allows any.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryBackend {
    /// Relay messages through the configured smtp server.
    Smtp,
    /// Forward messages to the EmailJS api.
    EmailJs,
    /// Only log messages. Nothing is delivered.
    Log,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub delivery: DeliveryBackend,
    /// Inbox that receives relayed messages.
    pub recipient: EmailAddressWithName,
    /// How long the form shows the success message.
    pub reset_delay: Duration,
    /// Relay endpoint used by `folio contact send`.
    pub relay_endpoint: Url,
    #[serde(default)]
    pub info: Vec<ContactInfoLink>,
}

#[derive(Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Use implicit TLS instead of STARTTLS.
    #[serde(default)]
    pub secure: bool,
    /// Sender address, defaults to `username`.
    pub from: Option<EmailAddress>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("secure", &self.secure)
            .field("from", &self.from)
            .finish()
    }
}

impl SmtpConfig {
    /// The address messages are sent from.
    pub fn sender(&self) -> anyhow::Result<EmailAddress> {
        match &self.from {
            Some(from) => Ok(from.clone()),
            None => self.username.parse().with_context(|| {
                format!(
                    "smtp.from is not set and smtp.username {:?} is not an email address",
                    self.username
                )
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    pub endpoint_override: Option<Url>,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH)], false).unwrap();
        assert_eq!(config.contact.delivery, DeliveryBackend::Log);
        assert_eq!(*config.contact.reset_delay, std::time::Duration::from_secs(5));
        assert!(config.smtp.is_none());
        assert!(!config.contact.info.is_empty());
    }

    #[test]
    fn override_file() {
        let path = std::env::temp_dir().join(format!("folio-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            [contact]
            delivery = "smtp"

            [smtp]
            host = "smtp.example.com"
            port = 465
            username = "mailer@example.com"
            password = "hunter2"
            secure = true
            "#
        )
        .unwrap();

        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH), &path], false).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.contact.delivery, DeliveryBackend::Smtp);
        let smtp = config.smtp.unwrap();
        assert!(smtp.secure);
        assert_eq!(smtp.sender().unwrap().as_str(), "mailer@example.com");
        assert!(!format!("{smtp:?}").contains("hunter2"));
    }

    #[test]
    fn sender_requires_address() {
        let smtp = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "mailer".into(),
            password: "secret".into(),
            secure: false,
            from: None,
        };
        smtp.sender().unwrap_err();

        let smtp = SmtpConfig {
            from: Some("site@example.com".parse().unwrap()),
            ..smtp
        };
        assert_eq!(smtp.sender().unwrap().as_str(), "site@example.com");
    }

    #[test]
    fn missing_file() {
        load_paths(&[Path::new("/nonexistent/folio.toml")], false).unwrap_err();
    }
}
