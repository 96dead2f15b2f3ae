use std::env;

use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport,
    transport::smtp::authentication::Credentials,
};

use crate::{config::SmtpSettings, error::NotifyError, models::AlertMessage};

pub const ADDRESS_KEY: &str = "EMAIL_ADDRESS";
pub const PASSWORD_KEY: &str = "EMAIL_PASSWORD";

/// Env var namespace for the sender credentials, e.g.
/// `EMAIL_CREDENTIALS__EMAIL_ADDRESS`.
pub const CREDENTIALS_SECTION: &str = "EMAIL_CREDENTIALS";

#[derive(Clone, PartialEq)]
pub struct EmailCredentials {
    pub address: String,
    pub password: String,
}

impl std::fmt::Debug for EmailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailCredentials")
            .field("address", &self.address)
            .field("password", &"***")
            .finish()
    }
}

/// Resolves `EMAIL_ADDRESS` / `EMAIL_PASSWORD` through `lookup`.
/// Missing or blank values are reported by key.
pub fn credentials_from<F>(lookup: F) -> Result<EmailCredentials, NotifyError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &'static str| {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(NotifyError::ConfigurationMissing(key))
    };

    Ok(EmailCredentials {
        address: get(ADDRESS_KEY)?,
        password: get(PASSWORD_KEY)?,
    })
}

/// Secret store consulted on every send.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Result<EmailCredentials, NotifyError>;
}

/// Reads `EMAIL_CREDENTIALS__*` from the process environment each time.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Result<EmailCredentials, NotifyError> {
        credentials_from(|key| env::var(format!("{CREDENTIALS_SECTION}__{key}")).ok())
    }
}

#[derive(Debug, Clone)]
pub struct StaticCredentials(pub EmailCredentials);

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Result<EmailCredentials, NotifyError> {
        Ok(self.0.clone())
    }
}

/// Delivers one finished message over an authenticated session.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, creds: &EmailCredentials, message: Message) -> Result<(), NotifyError>;
}

/// STARTTLS relay; a new session per message.
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    settings: SmtpSettings,
}

impl SmtpRelay {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn deliver(&self, creds: &EmailCredentials, message: Message) -> Result<(), NotifyError> {
        let transport = SmtpTransport::starttls_relay(&self.settings.host)?
            .port(self.settings.port)
            .credentials(Credentials::new(
                creds.address.clone(),
                creds.password.clone(),
            ))
            .build();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| NotifyError::NotificationFailed(format!("smtp task failed: {e}")))??;

        Ok(())
    }
}

/// Anything the monitor can hand a triggered alert to.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(
        &self,
        recipient: &str,
        ticker: &str,
        threshold: f64,
        current_price: f64,
    ) -> Result<(), NotifyError>;
}

pub struct Notifier<C, T> {
    credentials: C,
    transport: T,
    sender_name: Option<String>,
}

impl<C: CredentialSource, T: MailTransport> Notifier<C, T> {
    pub fn new(credentials: C, transport: T) -> Self {
        Self {
            credentials,
            transport,
            sender_name: None,
        }
    }

    pub fn with_sender_name(mut self, name: Option<String>) -> Self {
        self.sender_name = name;
        self
    }
}

#[async_trait]
impl<C: CredentialSource, T: MailTransport> AlertSink for Notifier<C, T> {
    async fn send_alert(
        &self,
        recipient: &str,
        ticker: &str,
        threshold: f64,
        current_price: f64,
    ) -> Result<(), NotifyError> {
        let creds = self.credentials.credentials()?;

        let alert = AlertMessage::compose(&creds.address, recipient, ticker, threshold, current_price);
        let message = alert.to_mime(self.sender_name.as_deref())?;

        self.transport.deliver(&creds, message).await?;

        tracing::info!(recipient, ticker, "email alert sent");
        Ok(())
    }
}
