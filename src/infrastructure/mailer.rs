use crate::domain::mailer::{EmailMessage, Mailer};
use crate::infrastructure::config::{MailConfig, MailTransport};
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Build the mailer selected by `MAIL_TRANSPORT`.
pub fn from_config(config: &MailConfig, http: reqwest::Client) -> Arc<dyn Mailer> {
    match &config.transport {
        MailTransport::Log => Arc::new(LogMailer),
        MailTransport::Brevo { api_key } => Arc::new(BrevoMailer::new(
            http,
            api_key.clone(),
            config.sender_email.clone(),
            config.sender_name.clone(),
        )),
    }
}

/// Local dev mailer that logs the message instead of sending it.
#[derive(Clone, Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            html_len = message.html.len(),
            "mail send stub"
        );
        tracing::debug!(html = %message.html, "mail body");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody {
    sender: BrevoEmailAddress,
    to: Vec<BrevoEmailAddress>,
    subject: String,
    html_content: String,
}

/// Transactional mail through the Brevo HTTP API.
pub struct BrevoMailer {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
}

impl BrevoMailer {
    pub fn new(
        http: reqwest::Client,
        api_key: String,
        sender_email: String,
        sender_name: String,
    ) -> Self {
        Self {
            http,
            endpoint: BREVO_SEND_URL.to_string(),
            api_key,
            sender_email,
            sender_name,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn body(&self, message: EmailMessage) -> BrevoSendEmailBody {
        BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.sender_email.clone(),
                name: Some(self.sender_name.clone()).filter(|n| !n.is_empty()),
            },
            to: vec![BrevoEmailAddress {
                email: message.to,
                name: None,
            }],
            subject: message.subject,
            html_content: message.html,
        }
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    #[tracing::instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let body = self.body(message);

        let response = self
            .http
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        tracing::error!(%status, "brevo rejected message");
        Err(anyhow::anyhow!(
            "Brevo send failed (status={}): {}",
            status.as_u16(),
            detail
        ))
    }
}
