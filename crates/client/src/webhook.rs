//! Inbound webhook support: signature verification, the subscription
//! handshake and typed payloads.
//!
//! This layer is framework-agnostic. A server hands the raw body and the
//! `X-Hub-Signature-256` header to [`verify_signature`], then parses the body
//! into a [`WebhookPayload`]. WhatsApp expects 200 OK even for payloads that
//! fail to parse; returning an error status triggers redelivery.

use {
    hmac::{Hmac, Mac},
    serde::Deserialize,
    sha2::Sha256,
    tracing::warn,
};

use crate::config::CloudApiConfig;

type HmacSha256 = Hmac<Sha256>;

/// Check a `X-Hub-Signature-256: sha256=<hex>` header against the raw
/// request body. Comparison is constant-time.
pub fn verify_signature(body: &[u8], signature_header: &str, app_secret: &str) -> bool {
    let Some(hex_digest) = signature_header.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Handle the `GET` subscription handshake.
///
/// WhatsApp sends `hub.mode=subscribe`, `hub.verify_token=<token>` and
/// `hub.challenge=<random>`; on success the challenge must be echoed back.
/// Returns `None` when the request must be rejected.
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    config: &CloudApiConfig,
) -> Option<String> {
    if mode != Some("subscribe") {
        warn!(?mode, "unexpected hub.mode in webhook verification");
        return None;
    }
    if token != Some(config.verify_token.as_str()) {
        warn!("webhook verify token mismatch");
        return None;
    }
    challenge.map(str::to_owned)
}

/// Root webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Always `whatsapp_business_account`.
    pub object: String,
    pub entry: Vec<WebhookEntry>,
}

impl WebhookPayload {
    /// All inbound messages across entries and changes, in payload order.
    pub fn messages(&self) -> impl Iterator<Item = &InboundMessage> {
        self.entry
            .iter()
            .flat_map(|e| &e.changes)
            .flat_map(|c| &c.value.messages)
    }

    /// All status updates across entries and changes, in payload order.
    pub fn statuses(&self) -> impl Iterator<Item = &MessageStatus> {
        self.entry
            .iter()
            .flat_map(|e| &e.changes)
            .flat_map(|c| &c.value.statuses)
    }
}

/// One entry, scoped to a WhatsApp Business Account id.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    pub id: String,
    pub changes: Vec<WebhookChange>,
}

/// A change notification, usually for the `messages` field.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChange {
    pub field: String,
    pub value: ChangeValue,
}

/// The payload of a change: messages, statuses and sender metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeValue {
    pub messaging_product: Option<String>,
    pub metadata: Option<PhoneMetadata>,
    #[serde(default)]
    pub contacts: Vec<SenderContact>,
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    #[serde(default)]
    pub statuses: Vec<MessageStatus>,
    #[serde(default)]
    pub errors: Vec<WebhookError>,
}

/// The receiving business phone number.
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneMetadata {
    pub display_phone_number: String,
    pub phone_number_id: String,
}

/// The sender of an inbound message.
#[derive(Debug, Clone, Deserialize)]
pub struct SenderContact {
    pub wa_id: String,
    pub profile: Option<SenderProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SenderProfile {
    pub name: String,
}

/// An inbound message. The per-type content is exposed through
/// [`InboundMessage::content`] as a typed view.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub from: String,
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub context: Option<ReplyContext>,
    text: Option<TextContent>,
    image: Option<MediaContent>,
    audio: Option<MediaContent>,
    video: Option<MediaContent>,
    sticker: Option<MediaContent>,
    document: Option<MediaContent>,
    location: Option<LocationContent>,
    interactive: Option<InteractiveReply>,
    button: Option<ButtonTap>,
    reaction: Option<ReactionContent>,
}

/// Typed view over an inbound message's content.
#[derive(Debug, Clone, Copy)]
pub enum MessageContent<'a> {
    Text(&'a TextContent),
    /// Image, audio, video, sticker or document; `kind` tells which.
    Media {
        kind: &'a str,
        media: &'a MediaContent,
    },
    Location(&'a LocationContent),
    /// A button or list reply to an interactive message.
    InteractiveReply(&'a InteractiveReply),
    /// A tap on a template quick-reply button.
    ButtonTap(&'a ButtonTap),
    Reaction(&'a ReactionContent),
    /// A type this library doesn't model; the discriminant is preserved.
    Unsupported(&'a str),
}

impl InboundMessage {
    pub fn content(&self) -> MessageContent<'_> {
        let kind = self.kind.as_str();

        let media_slot = match kind {
            "image" => &self.image,
            "audio" => &self.audio,
            "video" => &self.video,
            "sticker" => &self.sticker,
            "document" => &self.document,
            _ => &None,
        };
        if let Some(media) = media_slot {
            return MessageContent::Media { kind, media };
        }

        let content = match kind {
            "text" => self.text.as_ref().map(MessageContent::Text),
            "location" => self.location.as_ref().map(MessageContent::Location),
            "interactive" => self.interactive.as_ref().map(MessageContent::InteractiveReply),
            "button" => self.button.as_ref().map(MessageContent::ButtonTap),
            "reaction" => self.reaction.as_ref().map(MessageContent::Reaction),
            _ => None,
        };
        content.unwrap_or(MessageContent::Unsupported(kind))
    }

    /// The human-readable text of the message, if it has one: the body,
    /// a media caption or the title of a tapped reply.
    pub fn text_body(&self) -> Option<&str> {
        match self.content() {
            MessageContent::Text(text) => Some(text.body.as_str()),
            MessageContent::Media { media, .. } => media.caption.as_deref(),
            MessageContent::InteractiveReply(reply) => {
                reply.selection().map(|s| s.title.as_str())
            },
            MessageContent::ButtonTap(tap) => Some(tap.text.as_str()),
            _ => None,
        }
    }

    /// The media id, for download through the media endpoint.
    pub fn media_id(&self) -> Option<&str> {
        match self.content() {
            MessageContent::Media { media, .. } => Some(media.id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub body: String,
    #[serde(default)]
    pub preview_url: bool,
}

/// Inbound media reference (image, audio, video, sticker or document).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaContent {
    pub id: String,
    pub mime_type: Option<String>,
    pub sha256: Option<String>,
    pub caption: Option<String>,
    /// Present for documents only.
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationContent {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Reply to an interactive message.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractiveReply {
    #[serde(rename = "type")]
    pub kind: String,
    button_reply: Option<ReplySelection>,
    list_reply: Option<ReplySelection>,
}

impl InteractiveReply {
    /// Whichever of `button_reply`/`list_reply` the payload carries.
    pub fn selection(&self) -> Option<&ReplySelection> {
        self.button_reply.as_ref().or(self.list_reply.as_ref())
    }
}

/// The row or button the user picked.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplySelection {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

/// A tap on a template quick-reply button.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonTap {
    pub payload: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionContent {
    pub message_id: String,
    /// Empty when the reaction was withdrawn.
    pub emoji: String,
}

/// Reply-to context on an inbound message.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyContext {
    pub id: Option<String>,
    pub from: Option<String>,
}

/// Delivery/read status update for a previously sent message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageStatus {
    pub id: String,
    pub recipient_id: String,
    /// `sent`, `delivered`, `read` or `failed`.
    pub status: String,
    pub timestamp: String,
    #[serde(default)]
    pub errors: Vec<WebhookError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookError {
    pub code: i64,
    pub title: Option<String>,
    pub message: Option<String>,
    pub error_data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"object":"whatsapp_business_account","entry":[]}"#;
    // hmac-sha256 of BODY keyed with "top-secret"
    const SIGNATURE: &str =
        "sha256=629adaf75d34ade90045b48fd232d169dd9444af170681fb4765ad7db4a669bd";

    #[test]
    fn accepts_a_valid_signature() {
        assert!(verify_signature(BODY, SIGNATURE, "top-secret"));
    }

    #[test]
    fn rejects_wrong_secret_missing_prefix_and_bad_hex() {
        assert!(!verify_signature(BODY, SIGNATURE, "other-secret"));
        assert!(!verify_signature(
            BODY,
            SIGNATURE.trim_start_matches("sha256="),
            "top-secret"
        ));
        assert!(!verify_signature(BODY, "sha256=zzzz", "top-secret"));
        assert!(!verify_signature(b"tampered body", SIGNATURE, "top-secret"));
    }

    fn config() -> CloudApiConfig {
        CloudApiConfig {
            verify_token: "mytoken".into(),
            ..Default::default()
        }
    }

    #[test]
    fn subscription_handshake_echoes_the_challenge() {
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("mytoken"), Some("1158201444"), &config()),
            Some("1158201444".to_string())
        );
    }

    #[test]
    fn subscription_handshake_rejects_bad_requests() {
        let cfg = config();
        assert_eq!(
            verify_subscription(Some("unsubscribe"), Some("mytoken"), Some("c"), &cfg),
            None
        );
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("wrong"), Some("c"), &cfg),
            None
        );
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("mytoken"), None, &cfg),
            None
        );
    }

    #[test]
    fn parses_a_text_message_payload() {
        let json = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550783881",
                            "phone_number_id": "106540352242922"
                        },
                        "contacts": [{
                            "wa_id": "15551234567",
                            "profile": {"name": "John Doe"}
                        }],
                        "messages": [{
                            "from": "15551234567",
                            "id": "wamid.in1",
                            "timestamp": "1661860618",
                            "type": "text",
                            "text": {"body": "Hello!"}
                        }]
                    }
                }]
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        let message = payload.messages().next().unwrap();
        assert_eq!(message.from, "15551234567");
        assert_eq!(message.text_body(), Some("Hello!"));
        assert!(matches!(message.content(), MessageContent::Text(_)));
    }

    #[test]
    fn parses_a_list_reply() {
        let json = r#"{
            "from": "15551234567",
            "id": "wamid.in2",
            "timestamp": "1661860618",
            "type": "interactive",
            "interactive": {
                "type": "list_reply",
                "list_reply": {"id": "row-1", "title": "Apples", "description": "Fresh"}
            }
        }"#;

        let message: InboundMessage = serde_json::from_str(json).unwrap();
        let MessageContent::InteractiveReply(reply) = message.content() else {
            panic!("expected an interactive reply");
        };
        let selection = reply.selection().unwrap();
        assert_eq!(selection.id, "row-1");
        assert_eq!(message.text_body(), Some("Apples"));
    }

    #[test]
    fn unknown_message_types_degrade_gracefully() {
        let json = r#"{
            "from": "15551234567",
            "id": "wamid.in3",
            "timestamp": "1661860618",
            "type": "order"
        }"#;

        let message: InboundMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(
            message.content(),
            MessageContent::Unsupported("order")
        ));
        assert_eq!(message.text_body(), None);
    }

    #[test]
    fn parses_status_updates() {
        let json = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "statuses": [{
                            "id": "wamid.sent1",
                            "recipient_id": "15551234567",
                            "status": "delivered",
                            "timestamp": "1661860621"
                        }]
                    }
                }]
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        let status = payload.statuses().next().unwrap();
        assert_eq!(status.status, "delivered");
        assert!(payload.messages().next().is_none());
    }
}
