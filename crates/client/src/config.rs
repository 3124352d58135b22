//! Cloud API account configuration.

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Configuration for a single WhatsApp Business phone number.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudApiConfig {
    /// Business Phone Number ID (from Meta Business Suite).
    pub phone_number_id: String,

    /// Access token for the `/messages` endpoint.
    #[serde(serialize_with = "serialize_secret")]
    pub access_token: Secret<String>,

    /// App secret for webhook signature verification.
    #[serde(serialize_with = "serialize_secret")]
    pub app_secret: Secret<String>,

    /// Token echoed back during the webhook subscription handshake.
    pub verify_token: String,

    /// Base URL for the Cloud API. Defaults to the official Meta Graph API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

impl CloudApiConfig {
    /// Get the API base URL, defaulting to the official Meta Graph API.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://graph.facebook.com/v21.0")
    }

    /// Build the messages API endpoint URL.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base_url(), self.phone_number_id)
    }

    /// Build the media API endpoint URL for downloading media.
    pub fn media_url(&self, media_id: &str) -> String {
        format!("{}/{}", self.api_base_url(), media_id)
    }
}

impl std::fmt::Debug for CloudApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudApiConfig")
            .field("phone_number_id", &self.phone_number_id)
            .field("access_token", &"[REDACTED]")
            .field("app_secret", &"[REDACTED]")
            .field("verify_token", &self.verify_token)
            .finish_non_exhaustive()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for CloudApiConfig {
    fn default() -> Self {
        Self {
            phone_number_id: String::new(),
            access_token: Secret::new(String::new()),
            app_secret: Secret::new(String::new()),
            verify_token: String::new(),
            api_base_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "phone_number_id": "123456789",
            "access_token": "EAAxxxx",
            "app_secret": "abc123",
            "verify_token": "mytoken"
        }"#;
        let cfg: CloudApiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.phone_number_id, "123456789");
        assert_eq!(cfg.access_token.expose_secret(), "EAAxxxx");
        assert_eq!(cfg.app_secret.expose_secret(), "abc123");
        assert_eq!(cfg.verify_token, "mytoken");
        assert!(cfg.api_base_url.is_none());
    }

    #[test]
    fn serialize_roundtrip() {
        let cfg = CloudApiConfig {
            phone_number_id: "123".into(),
            access_token: Secret::new("tok".into()),
            app_secret: Secret::new("sec".into()),
            verify_token: "ver".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: CloudApiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg2.access_token.expose_secret(), "tok");
        assert_eq!(cfg2.verify_token, "ver");
    }

    #[test]
    fn api_urls() {
        let cfg = CloudApiConfig {
            phone_number_id: "123456789".into(),
            ..Default::default()
        };
        assert_eq!(
            cfg.messages_url(),
            "https://graph.facebook.com/v21.0/123456789/messages"
        );
        assert_eq!(
            cfg.media_url("media_abc"),
            "https://graph.facebook.com/v21.0/media_abc"
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg = CloudApiConfig {
            access_token: Secret::new("EAAxxxx".into()),
            ..Default::default()
        };
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("EAAxxxx"));
        assert!(debug.contains("[REDACTED]"));
    }
}
