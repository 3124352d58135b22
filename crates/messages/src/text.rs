//! Plain text messages.

use serde::Serialize;

use crate::{MessageError, OutboundMessage, limits};

/// Maximum length of a text message body.
const BODY_MAX: usize = 4096;

/// A plain text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    body: String,
    preview_url: bool,
}

impl Text {
    /// Create a text message. Fails if the body exceeds 4096 characters.
    pub fn new(body: impl Into<String>) -> Result<Self, MessageError> {
        let body = body.into();
        limits::check_len("text body", &body, BODY_MAX)?;
        Ok(Self {
            body,
            preview_url: false,
        })
    }

    /// Render a link preview for the first URL in the body.
    pub fn with_preview_url(mut self) -> Self {
        self.preview_url = true;
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl OutboundMessage for Text {
    fn message_type(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_at_limit_is_accepted() {
        let text = Text::new("x".repeat(4096)).unwrap();
        assert_eq!(text.body().len(), 4096);
    }

    #[test]
    fn body_over_limit_is_rejected() {
        assert_eq!(
            Text::new("x".repeat(4097)),
            Err(MessageError::TooLong {
                field: "text body",
                max: 4096
            })
        );
    }

    #[test]
    fn round_trips_body_unchanged() {
        let text = Text::new("hello \"world\" ❤️").unwrap();
        let wire = text.to_wire().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed["body"], "hello \"world\" ❤️");
        assert_eq!(parsed["preview_url"], false);
    }

    #[test]
    fn build_is_deterministic() {
        let text = Text::new("check https://example.com").unwrap().with_preview_url();
        assert_eq!(text.to_wire().unwrap(), text.to_wire().unwrap());
    }
}
