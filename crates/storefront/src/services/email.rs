//! Transactional email over SMTP via lettre.
//!
//! Email is optional in configuration; when disabled the service logs the
//! would-be delivery and succeeds, so auth flows work in development.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::SmtpConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for transactional mail.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<Transport>,
    base_url: String,
}

#[derive(Clone)]
struct Transport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service. `None` config disables sending.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(config: Option<&SmtpConfig>, base_url: &str) -> Result<Self, SmtpError> {
        let transport = match config {
            Some(config) => {
                let credentials = Credentials::new(
                    config.username.clone(),
                    config.password.expose_secret().to_string(),
                );

                let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
                    .port(config.port)
                    .credentials(credentials)
                    .build();

                Some(Transport {
                    mailer,
                    from_address: config.from_address.clone(),
                })
            }
            None => None,
        };

        Ok(Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send an email verification link.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or sent.
    pub async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), EmailError> {
        let link = format!("{}/api/auth/verify-email?token={token}", self.base_url);
        let body = format!(
            "Welcome to FarmHaat!\n\n\
             Confirm your email address by opening this link:\n\n{link}\n\n\
             The link expires in 24 hours. If you did not create an account, \
             you can ignore this message.\n"
        );

        self.send(to, "Verify your FarmHaat email", &body).await
    }

    /// Send a password reset link.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or sent.
    pub async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<(), EmailError> {
        let link = format!("{}/reset-password?token={token}", self.base_url);
        let body = format!(
            "A password reset was requested for your FarmHaat account.\n\n\
             Set a new password here:\n\n{link}\n\n\
             The link expires in 1 hour. If you did not request this, \
             you can ignore this message.\n"
        );

        self.send(to, "Reset your FarmHaat password", &body).await
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let Some(transport) = &self.transport else {
            tracing::info!(to = %to, subject = %subject, "Email sending disabled, skipping");
            return Ok(());
        };

        let email = Message::builder()
            .from(
                transport
                    .from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(transport.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        transport.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}
