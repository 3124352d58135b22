//! Outbound message sending.

use {
    secrecy::ExposeSecret,
    serde::Deserialize,
    tracing::{debug, warn},
    wacloud_messages::OutboundMessage,
};

use crate::{config::CloudApiConfig, error::ClientError};

/// Client for one WhatsApp Business phone number.
///
/// One fire-and-forget POST per operation: retries, timeouts and delivery
/// tracking are the caller's concern.
pub struct CloudApi {
    config: CloudApiConfig,
    http: reqwest::Client,
}

impl CloudApi {
    pub fn new(config: CloudApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Reuse an existing HTTP client (connection pooling across accounts).
    pub fn with_http_client(config: CloudApiConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &CloudApiConfig {
        &self.config
    }

    /// Send a message to a recipient's WhatsApp ID.
    pub async fn send<M: OutboundMessage>(
        &self,
        to: &str,
        message: &M,
    ) -> Result<SendMessageResponse, ClientError> {
        let envelope = build_envelope(to, message, None)?;
        self.post_envelope(to, &envelope).await
    }

    /// Send a message as a reply to an earlier message.
    pub async fn send_reply<M: OutboundMessage>(
        &self,
        to: &str,
        message: &M,
        reply_to: &str,
    ) -> Result<SendMessageResponse, ClientError> {
        let envelope = build_envelope(to, message, Some(reply_to))?;
        self.post_envelope(to, &envelope).await
    }

    /// Mark an inbound message as read (double blue check).
    pub async fn mark_read(&self, message_id: &str) -> Result<(), ClientError> {
        let payload = serde_json::json!({
            "messaging_product": "whatsapp",
            "status": "read",
            "message_id": message_id,
        });

        let response = self
            .http
            .post(self.config.messages_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.access_token.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(message_id, %status, "WhatsApp API error: {body}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(message_id, "marked as read");
        Ok(())
    }

    async fn post_envelope(
        &self,
        to: &str,
        envelope: &serde_json::Value,
    ) -> Result<SendMessageResponse, ClientError> {
        let response = self
            .http
            .post(self.config.messages_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.access_token.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(envelope)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(to, %status, "WhatsApp API error: {body}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<SendMessageResponse>().await?;
        debug!(to, message_id = parsed.message_id(), "message sent");
        Ok(parsed)
    }
}

/// Wrap a built payload in the `/messages` request envelope. The message's
/// discriminant becomes both the `type` field and the key that carries the
/// payload, which for contacts is a bare array.
fn build_envelope<M: OutboundMessage>(
    to: &str,
    message: &M,
    reply_to: Option<&str>,
) -> Result<serde_json::Value, ClientError> {
    let mut envelope = serde_json::Map::new();
    envelope.insert("messaging_product".into(), "whatsapp".into());
    envelope.insert("recipient_type".into(), "individual".into());
    envelope.insert("to".into(), to.into());
    if let Some(message_id) = reply_to {
        envelope.insert(
            "context".into(),
            serde_json::json!({ "message_id": message_id }),
        );
    }
    envelope.insert("type".into(), message.message_type().into());
    envelope.insert(
        message.message_type().into(),
        serde_json::to_value(message)?,
    );
    Ok(serde_json::Value::Object(envelope))
}

/// Response from the send message API.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub messaging_product: String,
    /// Recipients as the API normalized them.
    #[serde(default)]
    pub contacts: Vec<ResponseContact>,
    /// Ids of the accepted messages.
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

impl SendMessageResponse {
    /// Id of the first accepted message, if any.
    pub fn message_id(&self) -> Option<&str> {
        self.messages.first().map(|m| m.id.as_str())
    }
}

/// Contact in a send response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseContact {
    pub input: String,
    pub wa_id: String,
}

/// Accepted message info.
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    pub id: String,
}
