//! Outbound mail relay used by campaign delivery.
//!
//! [`SmtpRelay`] wraps a lettre SMTP transport configured from
//! [`RelayConfig`](crate::config::RelayConfig). Port 465 connects with implicit
//! TLS, any other port negotiates STARTTLS.

mod smtp;

pub use smtp::SmtpRelay;

use async_trait::async_trait;

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    pub reply_to: Option<String>,
}

impl OutboundMessage {
    pub fn text(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            html: None,
            reply_to: None,
        }
    }
}

/// Mail transport seam. Implement it to swap SMTP for an API-based provider.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Check connectivity and credentials without sending anything.
    async fn verify(&self) -> Result<(), MailError>;

    /// Deliver `message`, returning the provider-assigned message identifier.
    async fn send(&self, message: &OutboundMessage) -> Result<String, MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("SMTP error: {0}")]
    Smtp(String),
    #[error("relay verification failed for {host}:{port}")]
    Unreachable { host: String, port: u16 },
}
