use crate::error::MailError;
use database::{
    services::settings::SettingsService,
    settings::{Defaults, SettingKey},
};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use log::{info, warn};
use sea_orm::{DatabaseConnection, DbErr};
use std::future::Future;

/// A message ready to send, with plain text and HTML bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to_name: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Something that can deliver an [`Email`]
pub trait Mailer {
    /// Resolves to `Ok` only once the message has been accepted for delivery
    fn send(&self, email: Email) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// SMTP settings as stored in the settings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl SmtpConfig {
    /// Reads the current SMTP settings.
    ///
    /// Returns `None` when sending is switched off or when the host, login,
    /// password or from address is missing.
    pub async fn load(db: &DatabaseConnection, defaults: &Defaults) -> Result<Option<Self>, DbErr> {
        if !SettingsService::resolve_flag(db, defaults, SettingKey::SmtpEnabled).await? {
            info!("SMTP is not enabled in settings");
            return Ok(None);
        }

        let host = SettingsService::resolve(db, defaults, SettingKey::SmtpHost).await?;
        let username = SettingsService::resolve(db, defaults, SettingKey::SmtpUsername).await?;
        let password = SettingsService::resolve(db, defaults, SettingKey::SmtpPassword).await?;
        let from_email = SettingsService::resolve(db, defaults, SettingKey::SmtpFromEmail).await?;

        if [&host, &username, &password, &from_email]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            warn!("SMTP configuration incomplete");
            return Ok(None);
        }

        Ok(Some(Self {
            host: host.trim().to_string(),
            port: SettingsService::resolve_parsed(db, defaults, SettingKey::SmtpPort).await?,
            username: username.trim().to_string(),
            password,
            from_email: from_email.trim().to_string(),
            from_name: SettingsService::resolve(db, defaults, SettingKey::SmtpFromName).await?,
        }))
    }
}

/// Sends mail through an SMTP relay using STARTTLS
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: Mailbox::new(Some(config.from_name.clone()), config.from_email.parse()?),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(Some(email.to_name), email.to.parse()?))
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))?;

        self.transport.send(message).await?;
        Ok(())
    }
}
