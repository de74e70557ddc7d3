use anyhow::Context as _;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::Mailer;
use crate::domain::types::OutgoingMail;
use crate::error::BlogServiceError;

/// STARTTLS SMTP relay authenticated as the sender account.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16, sender: &str, password: &str) -> anyhow::Result<Self> {
        let from: Mailbox = sender.parse().context("parse smtp sender address")?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("build smtp transport")?
            .port(port)
            .credentials(Credentials::new(sender.to_owned(), password.to_owned()))
            .build();
        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), BlogServiceError> {
        let to: Mailbox = mail.to.parse().context("parse recipient address")?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body)
            .context("build mail message")?;
        self.transport
            .send(message)
            .await
            .context("send mail over smtp")?;
        Ok(())
    }
}
