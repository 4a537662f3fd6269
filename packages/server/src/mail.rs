//! Outgoing e-mail.
//!
//! [`Mailer`] is the transport seam: [`SmtpMailer`] talks to a real relay,
//! [`LogMailer`] only logs (used when `mail.enabled = false`). [`MailService`]
//! composes the account e-mails on top of whichever mailer is configured.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

use crate::config::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("E-mail address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("E-mail build error: {0}")]
    Build(String),
}

/// Who an account e-mail is addressed to.
#[derive(Debug, Clone, Copy)]
pub struct Recipient<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
}

impl<'a> From<&'a crate::entity::member::Model> for Recipient<'a> {
    fn from(member: &'a crate::entity::member::Model) -> Self {
        Self {
            email: &member.email,
            first_name: &member.first_name,
        }
    }
}

/// A rendered e-mail ready to hand to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Mailer that only writes the message to the log.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        info!(to = %mail.to, subject = %mail.subject, "Mail delivery disabled, logging message");
        Ok(())
    }
}

pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    if config.enabled {
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        Ok(Arc::new(LogMailer))
    }
}

/// Escape text interpolated into an HTML body.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Clone)]
pub struct MailService {
    mailer: Arc<dyn Mailer>,
    club_name: String,
    otp_validity_minutes: i64,
}

impl MailService {
    pub fn new(mailer: Arc<dyn Mailer>, club_name: &str, otp_validity_minutes: i64) -> Self {
        Self {
            mailer,
            club_name: club_name.to_string(),
            otp_validity_minutes,
        }
    }

    fn registration_mail(&self, to: Recipient<'_>, otp: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.email.to_string(),
            subject: format!("{} - Confirm your e-mail address", self.club_name),
            body: format!(
                "<p>Hello {},</p>\
                 <p>Welcome to {}! Use the following code to confirm your e-mail address:</p>\
                 <h2>{}</h2>\
                 <p>This code is valid for {} minutes.</p>",
                escape_html(to.first_name),
                escape_html(&self.club_name),
                escape_html(otp),
                self.otp_validity_minutes
            ),
        }
    }

    fn delete_account_mail(&self, to: Recipient<'_>, otp: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.email.to_string(),
            subject: format!("{} - Account deletion request", self.club_name),
            body: format!(
                "<p>Hello {},</p>\
                 <p>We received a request to delete your {} account. \
                 Enter the following code in the deletion form to confirm it:</p>\
                 <h2>{}</h2>\
                 <p>This code is valid for {} minutes. \
                 If you did not ask for this, you can ignore this e-mail.</p>",
                escape_html(to.first_name),
                escape_html(&self.club_name),
                escape_html(otp),
                self.otp_validity_minutes
            ),
        }
    }

    fn forgot_password_mail(&self, to: Recipient<'_>, otp: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.email.to_string(),
            subject: format!("{} - Your password", self.club_name),
            body: format!(
                "<p>Hello {},</p>\
                 <p>Use the following code to choose a new password:</p>\
                 <h2>{}</h2>\
                 <p>This code is valid for {} minutes.</p>",
                escape_html(to.first_name),
                escape_html(otp),
                self.otp_validity_minutes
            ),
        }
    }

    #[instrument(skip(self, to, otp), fields(to = %to.email))]
    pub async fn send_registration_email(
        &self,
        to: Recipient<'_>,
        otp: &str,
    ) -> Result<(), MailError> {
        self.mailer.send(self.registration_mail(to, otp)).await
    }

    #[instrument(skip(self, to, otp), fields(to = %to.email))]
    pub async fn send_delete_account_otp_email(
        &self,
        to: Recipient<'_>,
        otp: &str,
    ) -> Result<(), MailError> {
        self.mailer.send(self.delete_account_mail(to, otp)).await
    }

    #[instrument(skip(self, to, otp), fields(to = %to.email))]
    pub async fn send_forgot_password_email(
        &self,
        to: Recipient<'_>,
        otp: &str,
    ) -> Result<(), MailError> {
        self.mailer.send(self.forgot_password_mail(to, otp)).await
    }
}
