//! Error types for the Cloud API client.

use {thiserror::Error, wacloud_messages::MessageError};

/// Errors that can occur while talking to the Cloud API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid message: {0}")]
    Message(#[from] MessageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("WhatsApp API error: status {status}: {body}")]
    Api { status: u16, body: String },
}
