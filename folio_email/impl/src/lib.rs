use std::time::Duration;

use anyhow::{anyhow, Context};
use folio_email_contracts::{Email, EmailBody, EmailService};
use folio_models::email_address::EmailAddressWithName;
use folio_utils::Apply;
use lettre::{
    message::{header::ContentType, MessageBuilder, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Connection settings of the outbound smtp relay.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Use implicit TLS. Otherwise STARTTLS is used if the server offers it.
    pub secure: bool,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("secure", &self.secure)
            .finish()
    }
}

impl EmailServiceImpl {
    pub fn new(settings: &SmtpSettings, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .with_context(|| format!("Invalid smtp host {}", settings.host))?
        } else {
            let tls = TlsParameters::new(settings.host.clone())
                .with_context(|| format!("Invalid smtp host {}", settings.host))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self { from, transport })
    }
}

impl EmailService for EmailServiceImpl {
    #[tracing::instrument(skip_all, fields(recipient = %email.recipient))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let builder = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject);

        let message = match email.body {
            EmailBody::Text(body) => builder.header(ContentType::TEXT_PLAIN).body(body)?,
            EmailBody::Html(body) => builder.header(ContentType::TEXT_HTML).body(body)?,
            EmailBody::Alternative { text, html } => {
                builder.multipart(MultiPart::alternative_plain_html(text, html))?
            }
        };

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_debug_hides_password() {
        let settings = SmtpSettings {
            host: "smtp.example.com".into(),
            port: 465,
            username: "user".into(),
            password: "hunter2".into(),
            secure: true,
        };

        let debug = format!("{settings:?}");

        assert!(debug.contains("smtp.example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn new_secure_and_starttls() {
        for secure in [true, false] {
            let settings = SmtpSettings {
                host: "smtp.example.com".into(),
                port: if secure { 465 } else { 587 },
                username: "user".into(),
                password: "pass".into(),
                secure,
            };

            EmailServiceImpl::new(&settings, "Portfolio Contact <me@example.com>".parse().unwrap())
                .unwrap();
        }
    }
}
