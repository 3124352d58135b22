//! Thin transport layer for the WhatsApp Cloud API.
//!
//! Message payloads come pre-validated from `wacloud-messages`; this crate
//! wraps them in the `/messages` request envelope, posts them, and offers the
//! webhook-side primitives (signature verification, subscription handshake,
//! typed inbound payloads) a server embeds.

pub mod client;
pub mod config;
pub mod error;
pub mod webhook;

pub use {
    client::{CloudApi, SendMessageResponse},
    config::CloudApiConfig,
    error::ClientError,
};
