use anyhow::Context;
use folio_config::SmtpConfig;
use folio_email_impl::{EmailServiceImpl, SmtpSettings};

/// Display name of the sender of relayed contact messages.
pub const SENDER_NAME: &str = "Portfolio Contact";

/// Connect to the SMTP server
pub fn connect(config: &SmtpConfig) -> anyhow::Result<EmailServiceImpl> {
    let settings = SmtpSettings {
        host: config.host.clone(),
        port: config.port,
        username: config.username.clone(),
        password: config.password.clone(),
        secure: config.secure,
    };
    let from = config.sender()?.with_name(SENDER_NAME.into());

    EmailServiceImpl::new(&settings, from).context("Failed to connect to SMTP server")
}
