use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, MailRelay, OutboundMessage};
use crate::config::RelayConfig;

/// SMTP relay built once from [`RelayConfig`] and reused for every send.
#[derive(Clone)]
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
    port: u16,
}

impl SmtpRelay {
    pub fn new(config: &RelayConfig) -> Result<Self, MailError> {
        let from = sender_mailbox(config)?;

        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|err| MailError::Smtp(err.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            host: config.host.clone(),
            port: config.port,
        })
    }

    pub fn from_address(&self) -> &Mailbox {
        &self.from
    }

    fn build_message(&self, message: &OutboundMessage) -> Result<Message, MailError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(message.to.clone()))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .message_id(None);

        if let Some(reply_to) = &message.reply_to {
            let mailbox: Mailbox = reply_to
                .parse()
                .map_err(|_| MailError::InvalidAddress(reply_to.clone()))?;
            builder = builder.reply_to(mailbox);
        }

        let built = match &message.html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                html.clone(),
            )),
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(message.text.clone()),
        };

        built.map_err(|err| MailError::Build(err.to_string()))
    }
}

/// `Display Name <account>`: the authenticated account is always the envelope sender.
fn sender_mailbox(config: &RelayConfig) -> Result<Mailbox, MailError> {
    let address: Address = config
        .user
        .parse()
        .map_err(|_| MailError::InvalidAddress(config.user.clone()))?;
    Ok(Mailbox::new(Some(config.sender_name.clone()), address))
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn verify(&self) -> Result<(), MailError> {
        let reachable = self
            .transport
            .test_connection()
            .await
            .map_err(|err| MailError::Smtp(err.to_string()))?;

        if reachable {
            Ok(())
        } else {
            Err(MailError::Unreachable {
                host: self.host.clone(),
                port: self.port,
            })
        }
    }

    async fn send(&self, message: &OutboundMessage) -> Result<String, MailError> {
        let email = self.build_message(message)?;
        let message_id = email.headers().get_raw("Message-ID").map(str::to_string);

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|err| MailError::Smtp(err.to_string()))?;

        Ok(message_id.unwrap_or_else(|| {
            response
                .message()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }))
    }
}

impl std::fmt::Debug for SmtpRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpRelay")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}
