//! Mobile push messages.
//!
//! Messages go to the Expo push API in batches of at most [`MAX_BATCH`]. Without
//! an access token the messages are only logged.

use serde::Serialize;

use crate::server::error::AppError;

const PUSH_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";

/// Largest number of messages accepted per request.
pub const MAX_BATCH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Whether a device token has the shape the push API accepts.
pub fn is_push_token(token: &str) -> bool {
    (token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken["))
        && token.ends_with(']')
}

/// Splits messages into request sized batches, keeping their order.
pub fn batches(messages: &[PushMessage]) -> Vec<&[PushMessage]> {
    messages.chunks(MAX_BATCH).collect()
}

#[derive(Clone)]
pub struct PushService {
    client: reqwest::Client,
    access_token: Option<String>,
}

impl PushService {
    pub fn new(client: reqwest::Client, access_token: Option<String>) -> Self {
        Self {
            client,
            access_token,
        }
    }

    /// Sends messages, skipping those addressed to malformed tokens.
    ///
    /// A failed batch is logged and the remaining batches are still sent.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of messages in batches the API accepted
    pub async fn send(&self, messages: Vec<PushMessage>) -> Result<usize, AppError> {
        let (valid, invalid): (Vec<_>, Vec<_>) =
            messages.into_iter().partition(|m| is_push_token(&m.to));

        for message in &invalid {
            tracing::warn!("Skipping push message to invalid token {}", message.to);
        }

        let Some(access_token) = &self.access_token else {
            for message in &valid {
                tracing::info!(
                    to = %message.to,
                    "Push service not configured, message not sent: {}",
                    message.title
                );
            }
            return Ok(0);
        };

        let mut sent = 0;
        for batch in batches(&valid) {
            let result = self
                .client
                .post(PUSH_ENDPOINT)
                .bearer_auth(access_token)
                .json(batch)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match result {
                Ok(_) => sent += batch.len(),
                Err(e) => tracing::error!("Failed to send {} push messages: {}", batch.len(), e),
            }
        }

        Ok(sent)
    }
}
