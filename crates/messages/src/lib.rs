//! Outbound message types for the WhatsApp Cloud API.
//!
//! Every message is assembled bottom-up from self-validating value objects:
//! constructors check the Cloud API's field limits immediately and fail fast,
//! so an object that exists is always sendable. Messages are immutable after
//! construction and serialize deterministically into the exact JSON shape the
//! `/messages` endpoint expects.

pub mod contacts;
pub mod error;
pub mod interactive;
mod limits;
pub mod location;
pub mod media;
pub mod reaction;
pub mod template;
pub mod text;

pub use {
    contacts::{
        Address, Birthday, ContactComponent, ContactName, Contacts, Email, Organization, Phone,
        Url,
    },
    error::MessageError,
    interactive::{
        ActionButtons, ActionCatalog, ActionCtaUrl, ActionFlow, ActionList, ActionProduct,
        ActionProductList, Body, Button, Footer, Header, Interactive, InteractiveAction,
        ListSection, Product, ProductSection, Row,
    },
    location::Location,
    media::{Audio, Document, Image, Sticker, Video},
    reaction::Reaction,
    template::{
        BodyComponent, BodyParameter, ButtonComponent, Carousel, CarouselCard, Currency, DateTime,
        HeaderComponent, HeaderParameter, Language, LimitedTimeOffer, Template, TemplateComponent,
    },
    text::Text,
};

use serde::Serialize;

/// A message payload sendable through the `/messages` endpoint.
///
/// The discriminant doubles as the request's `type` field and as the JSON key
/// that holds the built payload, so the transport layer never needs to know
/// which concrete message it is carrying.
pub trait OutboundMessage: Serialize {
    /// Wire discriminant (`"text"`, `"template"`, `"contacts"`, ...).
    fn message_type(&self) -> &'static str;

    /// Serialize the payload into its wire-format JSON string.
    ///
    /// Idempotent: repeated calls on the same message yield identical output.
    fn to_wire(&self) -> Result<String, MessageError> {
        serde_json::to_string(self).map_err(MessageError::from)
    }
}
