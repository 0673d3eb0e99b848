//! Outgoing email.
//!
//! Mail is posted as JSON to an HTTP relay when one is configured. Without a relay
//! the message is written to the log, and tests collect messages in memory.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::server::{config::MailConfig, error::AppError};

#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Clone)]
pub enum Mailer {
    Http {
        client: reqwest::Client,
        config: MailConfig,
    },
    Log,
    Memory(Arc<Mutex<Vec<Email>>>),
}

impl Mailer {
    pub fn http(client: reqwest::Client, config: MailConfig) -> Self {
        Self::Http { client, config }
    }

    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(Vec::new())))
    }

    /// Sends one email.
    ///
    /// # Returns
    /// - `Ok(())` - Accepted by the relay, logged, or stored in memory
    /// - `Err(AppError::ReqwestErr)` - The relay could not be reached or refused the message
    pub async fn send(&self, email: &Email) -> Result<(), AppError> {
        match self {
            Self::Http { client, config } => {
                let mut request = client.post(&config.endpoint).json(&RelayRequest {
                    from: &config.from,
                    to: &email.to,
                    subject: &email.subject,
                    html: &email.html,
                });

                if let Some(api_key) = &config.api_key {
                    request = request.bearer_auth(api_key);
                }

                request.send().await?.error_for_status()?;
                tracing::debug!("Sent email '{}' to {}", email.subject, email.to);
            }
            Self::Log => {
                tracing::info!(
                    to = %email.to,
                    subject = %email.subject,
                    "Mail relay not configured, email not sent:\n{}",
                    email.html
                );
            }
            Self::Memory(outbox) => outbox.lock().await.push(email.clone()),
        }

        Ok(())
    }

    /// Messages collected by a memory mailer; empty for other transports.
    pub async fn outbox(&self) -> Vec<Email> {
        match self {
            Self::Memory(outbox) => outbox.lock().await.clone(),
            _ => Vec::new(),
        }
    }
}

/// Wraps a message body in the common mail layout.
pub fn layout(greeting: &str, paragraphs: &[String]) -> String {
    let mut html = format!("<p>{}</p>", greeting);
    for paragraph in paragraphs {
        html.push_str("<p>");
        html.push_str(paragraph);
        html.push_str("</p>");
    }
    html.push_str("<p>Regards,<br/>The rental team</p>");
    html
}
