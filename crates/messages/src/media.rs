//! Media messages: image, video, audio, document and sticker.
//!
//! Each type references either a previously uploaded media id or a public
//! link; only the populated reference is serialized.

use serde::Serialize;

use crate::OutboundMessage;

/// An image message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
}

impl Image {
    /// Reference an uploaded media id.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            link: None,
            caption: None,
        }
    }

    /// Reference a publicly reachable URL.
    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            id: None,
            link: Some(link.into()),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

impl OutboundMessage for Image {
    fn message_type(&self) -> &'static str {
        "image"
    }
}

/// A video message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
}

impl Video {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            link: None,
            caption: None,
        }
    }

    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            id: None,
            link: Some(link.into()),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

impl OutboundMessage for Video {
    fn message_type(&self) -> &'static str {
        "video"
    }
}

/// An audio message. Audio does not support captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Audio {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
}

impl Audio {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            link: None,
        }
    }

    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            id: None,
            link: Some(link.into()),
        }
    }
}

impl OutboundMessage for Audio {
    fn message_type(&self) -> &'static str {
        "audio"
    }
}

/// A sticker message. Stickers must be webp and carry no caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sticker {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
}

impl Sticker {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            link: None,
        }
    }

    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            id: None,
            link: Some(link.into()),
        }
    }
}

impl OutboundMessage for Sticker {
    fn message_type(&self) -> &'static str {
        "sticker"
    }
}

/// A document message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
}

impl Document {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            link: None,
            caption: None,
            filename: None,
        }
    }

    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            id: None,
            link: Some(link.into()),
            caption: None,
            filename: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Display name shown in the chat, including extension.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

impl OutboundMessage for Document {
    fn message_type(&self) -> &'static str {
        "document"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_reference_omits_link() {
        let wire = Image::from_id("media123").to_wire().unwrap();
        assert_eq!(wire, r#"{"id":"media123"}"#);
    }

    #[test]
    fn link_reference_with_caption() {
        let wire = Video::from_link("https://cdn.example.com/v.mp4")
            .with_caption("demo")
            .to_wire()
            .unwrap();
        assert_eq!(
            wire,
            r#"{"link":"https://cdn.example.com/v.mp4","caption":"demo"}"#
        );
    }

    #[test]
    fn document_filename_is_serialized() {
        let parsed: serde_json::Value = serde_json::from_str(
            &Document::from_id("doc1")
                .with_filename("invoice.pdf")
                .to_wire()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(parsed["filename"], "invoice.pdf");
        assert!(parsed.get("link").is_none());
    }
}
