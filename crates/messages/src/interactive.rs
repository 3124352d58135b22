//! Interactive messages: reply buttons, list menus, product showcases,
//! call-to-action links and flows.
//!
//! The action decides the message's `type` tag and which of body/header are
//! required or forbidden; the whole matrix is checked when the [`Interactive`]
//! is constructed.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    MessageError, OutboundMessage, limits,
    media::{Document, Image, Video},
};

const BODY_MAX: usize = 1024;
const FOOTER_MAX: usize = 60;
const HEADER_TEXT_MAX: usize = 60;
const BUTTON_ID_MAX: usize = 256;
const BUTTON_TITLE_MAX: usize = 20;
const LIST_LABEL_MAX: usize = 20;
const ROW_ID_MAX: usize = 200;
const ROW_TITLE_MAX: usize = 24;
const ROW_DESCRIPTION_MAX: usize = 72;
const SECTION_TITLE_MAX: usize = 24;
const SECTION_ROWS_MAX: usize = 10;
const SECTION_PRODUCTS_MAX: usize = 30;
const SECTIONS_MAX: usize = 10;
const BUTTONS_MAX: usize = 3;

/// Body text of an interactive message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Body {
    text: String,
}

impl Body {
    pub fn new(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        limits::check_len("interactive body text", &text, BODY_MAX)?;
        Ok(Self { text })
    }
}

/// Footer text of an interactive message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    text: String,
}

impl Footer {
    pub fn new(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        limits::check_len("interactive footer text", &text, FOOTER_MAX)?;
        Ok(Self { text })
    }
}

/// Header of an interactive message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Header {
    value: HeaderValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HeaderValue {
    Text { text: String },
    Image { image: Image },
    Video { video: Video },
    Document { document: Document },
}

impl Header {
    pub fn text(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        limits::check_len("header text", &text, HEADER_TEXT_MAX)?;
        Ok(Self {
            value: HeaderValue::Text { text },
        })
    }

    pub fn image(image: Image) -> Self {
        Self {
            value: HeaderValue::Image { image },
        }
    }

    pub fn video(video: Video) -> Self {
        Self {
            value: HeaderValue::Video { video },
        }
    }

    pub fn document(document: Document) -> Self {
        Self {
            value: HeaderValue::Document { document },
        }
    }

    fn is_text(&self) -> bool {
        matches!(self.value, HeaderValue::Text { .. })
    }
}

/// A product reference inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    product_retailer_id: String,
}

impl Product {
    pub fn new(product_retailer_id: impl Into<String>) -> Self {
        Self {
            product_retailer_id: product_retailer_id.into(),
        }
    }

    pub(crate) fn into_retailer_id(self) -> String {
        self.product_retailer_id
    }
}

/// A tappable row in a list message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Row {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Result<Self, MessageError> {
        let id = id.into();
        let title = title.into();
        limits::check_len("row id", &id, ROW_ID_MAX)?;
        limits::check_text("row title", &title, ROW_TITLE_MAX)?;
        Ok(Self {
            id,
            title,
            description: None,
        })
    }

    pub fn with_description(
        mut self,
        description: impl Into<String>,
    ) -> Result<Self, MessageError> {
        let description = description.into();
        limits::check_len("row description", &description, ROW_DESCRIPTION_MAX)?;
        self.description = Some(description);
        Ok(self)
    }
}

/// A titled group of rows in a list message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    rows: Vec<Row>,
}

impl ListSection {
    pub fn new(rows: Vec<Row>) -> Result<Self, MessageError> {
        limits::check_count("ListSection", "rows", rows.len(), SECTION_ROWS_MAX)?;
        Ok(Self { title: None, rows })
    }

    pub fn titled(title: impl Into<String>, rows: Vec<Row>) -> Result<Self, MessageError> {
        let title = title.into();
        limits::check_len("section title", &title, SECTION_TITLE_MAX)?;
        let mut section = Self::new(rows)?;
        section.title = Some(title);
        Ok(section)
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// A titled group of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    product_items: Vec<Product>,
}

impl ProductSection {
    pub fn new(products: Vec<Product>) -> Result<Self, MessageError> {
        limits::check_count(
            "ProductSection",
            "products",
            products.len(),
            SECTION_PRODUCTS_MAX,
        )?;
        Ok(Self {
            title: None,
            product_items: products,
        })
    }

    pub fn titled(title: impl Into<String>, products: Vec<Product>) -> Result<Self, MessageError> {
        let title = title.into();
        limits::check_len("section title", &title, SECTION_TITLE_MAX)?;
        let mut section = Self::new(products)?;
        section.title = Some(title);
        Ok(section)
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// A reply button. Ids and titles must be unique within one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: &'static str,
    reply: ButtonReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ButtonReply {
    id: String,
    title: String,
}

impl Button {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Result<Self, MessageError> {
        let id = id.into();
        let title = title.into();
        limits::check_len("button id", &id, BUTTON_ID_MAX)?;
        if id.starts_with(' ') || id.ends_with(' ') {
            return Err(MessageError::Padded { field: "button id" });
        }
        limits::check_text("button title", &title, BUTTON_TITLE_MAX)?;
        Ok(Self {
            kind: "reply",
            reply: ButtonReply { id, title },
        })
    }

    fn id(&self) -> &str {
        &self.reply.id
    }

    fn title(&self) -> &str {
        &self.reply.title
    }
}

/// Up to three reply buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionButtons {
    buttons: Vec<Button>,
}

impl ActionButtons {
    pub fn new(buttons: Vec<Button>) -> Result<Self, MessageError> {
        limits::check_count("ActionButtons", "buttons", buttons.len(), BUTTONS_MAX)?;

        let ids: HashSet<&str> = buttons.iter().map(Button::id).collect();
        if ids.len() != buttons.len() {
            return Err(MessageError::DuplicateButton { field: "id" });
        }
        let titles: HashSet<&str> = buttons.iter().map(Button::title).collect();
        if titles.len() != buttons.len() {
            return Err(MessageError::DuplicateButton { field: "title" });
        }

        Ok(Self { buttons })
    }
}

/// A list menu behind a single button label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionList {
    button: String,
    sections: Vec<ListSection>,
}

impl ActionList {
    pub fn new(button: impl Into<String>, sections: Vec<ListSection>) -> Result<Self, MessageError> {
        let button = button.into();
        limits::check_text("list button label", &button, LIST_LABEL_MAX)?;
        limits::check_count("ActionList", "sections", sections.len(), SECTIONS_MAX)?;
        limits::check_section_titles("ActionList", sections.iter().map(ListSection::title))?;
        Ok(Self { button, sections })
    }
}

/// A single product from a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionProduct {
    catalog_id: String,
    #[serde(flatten)]
    product: Product,
}

impl ActionProduct {
    pub fn new(catalog_id: impl Into<String>, product: Product) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            product,
        }
    }
}

/// A multi-section product list from a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionProductList {
    catalog_id: String,
    sections: Vec<ProductSection>,
}

impl ActionProductList {
    pub fn new(
        catalog_id: impl Into<String>,
        sections: Vec<ProductSection>,
    ) -> Result<Self, MessageError> {
        limits::check_count("ActionProductList", "sections", sections.len(), SECTIONS_MAX)?;
        limits::check_section_titles(
            "ActionProductList",
            sections.iter().map(ProductSection::title),
        )?;
        Ok(Self {
            catalog_id: catalog_id.into(),
            sections,
        })
    }
}

/// The whole catalog, optionally led by a thumbnail product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionCatalog {
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<CatalogParameters>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CatalogParameters {
    thumbnail_product_retailer_id: String,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self {
            name: "catalog_message",
            parameters: None,
        }
    }

    pub fn with_thumbnail(mut self, product: Product) -> Self {
        self.parameters = Some(CatalogParameters {
            thumbnail_product_retailer_id: product.into_retailer_id(),
        });
        self
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// A call-to-action URL button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionCtaUrl {
    name: &'static str,
    parameters: CtaUrlParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CtaUrlParameters {
    display_text: String,
    url: String,
}

impl ActionCtaUrl {
    pub fn new(display_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: "cta_url",
            parameters: CtaUrlParameters {
                display_text: display_text.into(),
                url: url.into(),
            },
        }
    }
}

/// A WhatsApp Flow launcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionFlow {
    name: &'static str,
    parameters: FlowParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct FlowParameters {
    flow_message_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    flow_token: Option<String>,
    flow_id: String,
    flow_cta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flow_action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flow_action_payload: Option<serde_json::Value>,
}

impl ActionFlow {
    /// Create a flow action. The CTA label is 1-20 characters, emoji-free.
    pub fn new(flow_id: impl Into<String>, flow_cta: impl Into<String>) -> Result<Self, MessageError> {
        let flow_cta = flow_cta.into();
        limits::check_text("flow CTA", &flow_cta, 20)?;
        if limits::contains_emoji(&flow_cta) {
            return Err(MessageError::EmojiNotAllowed { field: "flow CTA" });
        }
        Ok(Self {
            name: "flow",
            parameters: FlowParameters {
                flow_message_version: "3",
                flow_token: None,
                flow_id: flow_id.into(),
                flow_cta,
                mode: None,
                flow_action: None,
                flow_action_payload: None,
            },
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.parameters.flow_token = Some(token.into());
        self
    }

    /// Open the flow at a specific screen with an optional data payload.
    pub fn navigate(mut self, payload: serde_json::Value) -> Self {
        self.parameters.flow_action = Some("navigate");
        self.parameters.flow_action_payload = Some(payload);
        self
    }

    /// Let the flow endpoint drive the first screen.
    pub fn data_exchange(mut self) -> Self {
        self.parameters.flow_action = Some("data_exchange");
        self
    }

    /// Target the draft version of the flow.
    pub fn draft(mut self) -> Self {
        self.parameters.mode = Some("draft");
        self
    }
}

/// The action of an interactive message; decides the message's `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InteractiveAction {
    List(ActionList),
    Buttons(ActionButtons),
    Product(ActionProduct),
    ProductList(ActionProductList),
    Catalog(ActionCatalog),
    CtaUrl(ActionCtaUrl),
    Flow(ActionFlow),
}

impl InteractiveAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Buttons(_) => "button",
            Self::Product(_) => "product",
            Self::ProductList(_) => "product_list",
            Self::Catalog(_) => "catalog_message",
            Self::CtaUrl(_) => "cta_url",
            Self::Flow(_) => "flow",
        }
    }
}

macro_rules! action_from {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for InteractiveAction {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

action_from!(ActionList => List);
action_from!(ActionButtons => Buttons);
action_from!(ActionProduct => Product);
action_from!(ActionProductList => ProductList);
action_from!(ActionCatalog => Catalog);
action_from!(ActionCtaUrl => CtaUrl);
action_from!(ActionFlow => Flow);

/// An interactive message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interactive {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<Header>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<Footer>,
    action: InteractiveAction,
}

impl Interactive {
    /// Compose an interactive message, checking the action/body/header
    /// matrix:
    ///
    /// 1. every action except a single product requires a body;
    /// 2. a single product action forbids a header;
    /// 3. a product list requires a text header;
    /// 4. list, product list, CTA URL and flow actions only accept text
    ///    headers.
    pub fn new(
        action: impl Into<InteractiveAction>,
        body: Option<Body>,
        header: Option<Header>,
        footer: Option<Footer>,
    ) -> Result<Self, MessageError> {
        let action = action.into();
        let kind = action.kind();

        if kind != "product" && body.is_none() {
            return Err(MessageError::BodyRequired);
        }
        if kind == "product" && header.is_some() {
            return Err(MessageError::HeaderNotAllowed);
        }
        if kind == "product_list" && !header.as_ref().is_some_and(Header::is_text) {
            return Err(MessageError::TextHeaderRequired { action: kind });
        }
        if matches!(kind, "list" | "product_list" | "cta_url" | "flow")
            && header.as_ref().is_some_and(|h| !h.is_text())
        {
            return Err(MessageError::TextHeaderRequired { action: kind });
        }

        Ok(Self {
            kind,
            header,
            body,
            footer,
            action,
        })
    }
}

impl OutboundMessage for Interactive {
    fn message_type(&self) -> &'static str {
        "interactive"
    }
}
