//! Template messages.
//!
//! A template is an ordered tree of components. Validation and flattening
//! happen inside [`Template::new`]: the component list is walked once with a
//! build context that tracks whether the body is the sole component (which
//! decides its character ceiling) and hands out positional indices to button
//! components. The same walk is reused by carousel cards, so no throwaway
//! parent objects are ever constructed.

use serde::Serialize;

use crate::{
    MessageError, OutboundMessage,
    interactive::{Product, ProductSection},
    limits,
    location::Location,
    media::{Document, Image, Video},
};

const HEADER_TEXT_MAX: usize = 60;
const BODY_TEXT_MAX: usize = 1024;
const BODY_TEXT_ALONE_MAX: usize = 32768;
const MPM_SECTIONS_MAX: usize = 10;
const CAROUSEL_CARDS_MAX: usize = 10;

/// Template language, e.g. `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    code: String,
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self { code: code.to_string() }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Self { code }
    }
}

/// Currency value for a template variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    fallback_value: String,
    code: String,
    amount_1000: i64,
}

impl Currency {
    /// `amount_1000` is the amount multiplied by 1000 and must be positive.
    pub fn new(
        amount_1000: i64,
        code: impl Into<String>,
        fallback_value: impl Into<String>,
    ) -> Result<Self, MessageError> {
        if amount_1000 <= 0 {
            return Err(MessageError::NonPositiveAmount);
        }
        Ok(Self {
            fallback_value: fallback_value.into(),
            code: code.into(),
            amount_1000,
        })
    }
}

/// Date value for a template variable. The API only renders the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTime {
    fallback_value: String,
}

impl DateTime {
    pub fn new(fallback_value: impl Into<String>) -> Self {
        Self {
            fallback_value: fallback_value.into(),
        }
    }
}

/// A header variable, serialized as `{ "type": "<tag>", "<tag>": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HeaderParameter {
    value: HeaderParameterValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HeaderParameterValue {
    Text { text: String },
    Currency { currency: Currency },
    DateTime { date_time: DateTime },
    Image { image: Image },
    Document { document: Document },
    Video { video: Video },
    Location { location: Location },
    Product { product: Product },
}

impl HeaderParameter {
    fn from_value(value: HeaderParameterValue) -> Self {
        Self { value }
    }

    pub fn text(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        limits::check_len("header text", &text, HEADER_TEXT_MAX)?;
        Ok(Self::from_value(HeaderParameterValue::Text { text }))
    }

    pub fn currency(currency: Currency) -> Self {
        Self::from_value(HeaderParameterValue::Currency { currency })
    }

    pub fn date_time(date_time: DateTime) -> Self {
        Self::from_value(HeaderParameterValue::DateTime { date_time })
    }

    pub fn image(image: Image) -> Self {
        Self::from_value(HeaderParameterValue::Image { image })
    }

    pub fn document(document: Document) -> Self {
        Self::from_value(HeaderParameterValue::Document { document })
    }

    pub fn video(video: Video) -> Self {
        Self::from_value(HeaderParameterValue::Video { video })
    }

    /// A location header must carry both a name and an address.
    pub fn location(location: Location) -> Result<Self, MessageError> {
        if location.name().is_none() || location.address().is_none() {
            return Err(MessageError::LocationDetailRequired);
        }
        Ok(Self::from_value(HeaderParameterValue::Location { location }))
    }

    pub fn product(product: Product) -> Self {
        Self::from_value(HeaderParameterValue::Product { product })
    }
}

/// A body variable: positional by default, named when `parameter_name` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyParameter {
    #[serde(flatten)]
    value: BodyParameterValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BodyParameterValue {
    Text { text: String },
    Currency { currency: Currency },
    DateTime { date_time: DateTime },
}

impl BodyParameter {
    /// Text variable. The hard ceiling is 32768 characters; the walk in
    /// [`Template::new`] lowers it to 1024 unless the body is the template's
    /// only component.
    pub fn text(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        limits::check_len("template body text", &text, BODY_TEXT_ALONE_MAX)?;
        Ok(Self {
            value: BodyParameterValue::Text { text },
            parameter_name: None,
        })
    }

    pub fn currency(currency: Currency) -> Self {
        Self {
            value: BodyParameterValue::Currency { currency },
            parameter_name: None,
        }
    }

    pub fn date_time(date_time: DateTime) -> Self {
        Self {
            value: BodyParameterValue::DateTime { date_time },
            parameter_name: None,
        }
    }

    /// Bind this variable to a named template placeholder instead of a
    /// positional one.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = Some(name.into());
        self
    }
}

/// Header component: one parameter per `{{n}}` in the template header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderComponent {
    parameters: Vec<HeaderParameter>,
}

impl HeaderComponent {
    pub fn new(parameters: Vec<HeaderParameter>) -> Self {
        Self { parameters }
    }
}

/// Body component: one parameter per `{{n}}` in the template body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyComponent {
    parameters: Vec<BodyParameter>,
}

impl BodyComponent {
    pub fn new(parameters: Vec<BodyParameter>) -> Self {
        Self { parameters }
    }
}

/// A button component. Buttons receive their positional index from the
/// component walk in declaration order; [`ButtonComponent::skip`] reserves an
/// index without emitting anything, for button slots that need no parameters
/// (e.g. phone-number buttons handled server-side).
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonComponent {
    kind: ButtonKind,
}

#[derive(Debug, Clone, PartialEq)]
enum ButtonKind {
    Url { text: String },
    QuickReply { payload: String },
    Catalog { thumbnail: Product },
    Mpm { thumbnail: Product, sections: Vec<ProductSection> },
    CopyCode { code: String },
    Flow { flow_token: String, flow_action_data: Option<serde_json::Value> },
    Skip,
}

impl ButtonComponent {
    fn from_kind(kind: ButtonKind) -> Self {
        Self { kind }
    }

    /// Variable suffix for a dynamic-URL button.
    pub fn url(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        limits::check_not_empty("url button text", &text)?;
        Ok(Self::from_kind(ButtonKind::Url { text }))
    }

    /// Payload delivered back on a quick-reply tap.
    pub fn quick_reply(payload: impl Into<String>) -> Result<Self, MessageError> {
        let payload = payload.into();
        limits::check_not_empty("quick reply payload", &payload)?;
        Ok(Self::from_kind(ButtonKind::QuickReply { payload }))
    }

    /// Catalog button with a thumbnail product.
    pub fn catalog(thumbnail: Product) -> Self {
        Self::from_kind(ButtonKind::Catalog { thumbnail })
    }

    /// Multi-product button: 1-10 sections, all titled once more than one
    /// is given.
    pub fn mpm(
        thumbnail: Product,
        sections: Vec<ProductSection>,
    ) -> Result<Self, MessageError> {
        limits::check_count("MpmButton", "sections", sections.len(), MPM_SECTIONS_MAX)?;
        limits::check_section_titles("MpmButton", sections.iter().map(ProductSection::title))?;
        Ok(Self::from_kind(ButtonKind::Mpm {
            thumbnail,
            sections,
        }))
    }

    /// Coupon-code button.
    pub fn copy_code(code: impl Into<String>) -> Result<Self, MessageError> {
        let code = code.into();
        limits::check_not_empty("coupon code", &code)?;
        Ok(Self::from_kind(ButtonKind::CopyCode { code }))
    }

    /// Flow button. Token and action data are opaque to this layer.
    pub fn flow(
        flow_token: impl Into<String>,
        flow_action_data: Option<serde_json::Value>,
    ) -> Self {
        Self::from_kind(ButtonKind::Flow {
            flow_token: flow_token.into(),
            flow_action_data,
        })
    }

    /// Consume an index slot without emitting a component.
    pub fn skip() -> Self {
        Self::from_kind(ButtonKind::Skip)
    }

    fn is_skip(&self) -> bool {
        matches!(self.kind, ButtonKind::Skip)
    }

    fn sub_type(&self) -> &'static str {
        match self.kind {
            ButtonKind::Url { .. } => "url",
            ButtonKind::QuickReply { .. } => "quick_reply",
            ButtonKind::Catalog { .. } => "catalog",
            ButtonKind::Mpm { .. } => "mpm",
            ButtonKind::CopyCode { .. } => "copy_code",
            ButtonKind::Flow { .. } => "flow",
            ButtonKind::Skip => "skip",
        }
    }

    fn into_parameters(self) -> Vec<ButtonParameter> {
        match self.kind {
            ButtonKind::Url { text } => vec![ButtonParameter::Text { text }],
            ButtonKind::QuickReply { payload } => vec![ButtonParameter::Payload { payload }],
            ButtonKind::Catalog { thumbnail } => vec![ButtonParameter::Action {
                action: ButtonAction::Catalog {
                    thumbnail_product_retailer_id: thumbnail.into_retailer_id(),
                },
            }],
            ButtonKind::Mpm {
                thumbnail,
                sections,
            } => vec![ButtonParameter::Action {
                action: ButtonAction::Mpm {
                    thumbnail_product_retailer_id: thumbnail.into_retailer_id(),
                    sections,
                },
            }],
            ButtonKind::CopyCode { code } => {
                vec![ButtonParameter::CouponCode { coupon_code: code }]
            },
            ButtonKind::Flow {
                flow_token,
                flow_action_data,
            } => vec![ButtonParameter::Action {
                action: ButtonAction::Flow {
                    flow_token,
                    flow_action_data,
                },
            }],
            ButtonKind::Skip => Vec::new(),
        }
    }
}

/// Limited-time offer component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedTimeOffer {
    expiration_time_ms: i64,
}

impl LimitedTimeOffer {
    /// `expiration_time_ms` is a unix timestamp in milliseconds.
    pub fn new(expiration_time_ms: i64) -> Result<Self, MessageError> {
        if expiration_time_ms < 0 {
            return Err(MessageError::NegativeExpiration);
        }
        Ok(Self { expiration_time_ms })
    }
}

/// Carousel component: 1-10 cards, indexed in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    cards: Vec<BuiltCard>,
}

impl Carousel {
    pub fn new(cards: Vec<CarouselCard>) -> Result<Self, MessageError> {
        limits::check_count("Carousel", "cards", cards.len(), CAROUSEL_CARDS_MAX)?;
        let cards = cards
            .into_iter()
            .enumerate()
            .map(|(index, card)| BuiltCard {
                card_index: index as u8,
                components: card.components,
            })
            .collect();
        Ok(Self { cards })
    }
}

/// One card of a carousel: a media header plus its own component list, run
/// through the same walk as a template's components with a fresh button
/// counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselCard {
    components: Vec<BuiltComponent>,
}

impl CarouselCard {
    pub fn new(
        header: HeaderParameter,
        components: Vec<TemplateComponent>,
    ) -> Result<Self, MessageError> {
        let mut all = Vec::with_capacity(components.len() + 1);
        all.push(TemplateComponent::Header(HeaderComponent::new(vec![header])));
        all.extend(components);
        Ok(Self {
            components: build_components(all)?,
        })
    }
}

/// One entry in a template's ordered component list.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateComponent {
    Header(HeaderComponent),
    Body(BodyComponent),
    Button(ButtonComponent),
    Carousel(Carousel),
    LimitedTimeOffer(LimitedTimeOffer),
}

macro_rules! template_component_from {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for TemplateComponent {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

template_component_from!(HeaderComponent => Header);
template_component_from!(BodyComponent => Body);
template_component_from!(ButtonComponent => Button);
template_component_from!(Carousel => Carousel);
template_component_from!(LimitedTimeOffer => LimitedTimeOffer);

/// State threaded through one component walk. Scoped strictly to a single
/// [`build_components`] call and never shared.
struct BuildContext {
    body_alone: bool,
    button_index: u8,
}

impl BuildContext {
    fn next_button_index(&mut self) -> u8 {
        let index = self.button_index;
        self.button_index += 1;
        index
    }
}

/// A flattened, wire-ready component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BuiltComponent {
    Header {
        parameters: Vec<HeaderParameter>,
    },
    Body {
        parameters: Vec<BodyParameter>,
    },
    Button {
        sub_type: &'static str,
        index: u8,
        parameters: Vec<ButtonParameter>,
    },
    Carousel {
        cards: Vec<BuiltCard>,
    },
    LimitedTimeOffer {
        parameters: Vec<LtoParameter>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct BuiltCard {
    card_index: u8,
    components: Vec<BuiltComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ButtonParameter {
    Text { text: String },
    Payload { payload: String },
    CouponCode { coupon_code: String },
    Action { action: ButtonAction },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum ButtonAction {
    Catalog {
        thumbnail_product_retailer_id: String,
    },
    Mpm {
        thumbnail_product_retailer_id: String,
        sections: Vec<ProductSection>,
    },
    Flow {
        flow_token: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        flow_action_data: Option<serde_json::Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LtoParameter {
    LimitedTimeOffer { limited_time_offer: LtoValue },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct LtoValue {
    expiration_time_ms: i64,
}

/// Walk an ordered component list once: enforce the at-most-one rules, apply
/// the body ceiling, hand out button indices and drop skip sentinels while
/// preserving relative order.
fn build_components(
    components: Vec<TemplateComponent>,
) -> Result<Vec<BuiltComponent>, MessageError> {
    let mut ctx = BuildContext {
        body_alone: components.len() == 1
            && matches!(components[0], TemplateComponent::Body(_)),
        button_index: 0,
    };

    let mut built = Vec::with_capacity(components.len());
    let mut seen_header = false;
    let mut seen_body = false;
    let mut seen_carousel = false;
    let mut seen_lto = false;

    for component in components {
        match component {
            TemplateComponent::Header(header) => {
                check_single(&mut seen_header, "header component")?;
                built.push(BuiltComponent::Header {
                    parameters: header.parameters,
                });
            },
            TemplateComponent::Body(body) => {
                check_single(&mut seen_body, "body component")?;
                if !ctx.body_alone {
                    for parameter in &body.parameters {
                        if let BodyParameterValue::Text { text } = &parameter.value {
                            limits::check_len("template body text", text, BODY_TEXT_MAX)?;
                        }
                    }
                }
                built.push(BuiltComponent::Body {
                    parameters: body.parameters,
                });
            },
            TemplateComponent::Button(button) => {
                let index = ctx.next_button_index();
                if button.is_skip() {
                    continue;
                }
                built.push(BuiltComponent::Button {
                    sub_type: button.sub_type(),
                    index,
                    parameters: button.into_parameters(),
                });
            },
            TemplateComponent::Carousel(carousel) => {
                check_single(&mut seen_carousel, "carousel component")?;
                built.push(BuiltComponent::Carousel {
                    cards: carousel.cards,
                });
            },
            TemplateComponent::LimitedTimeOffer(lto) => {
                check_single(&mut seen_lto, "limited-time offer component")?;
                built.push(BuiltComponent::LimitedTimeOffer {
                    parameters: vec![LtoParameter::LimitedTimeOffer {
                        limited_time_offer: LtoValue {
                            expiration_time_ms: lto.expiration_time_ms,
                        },
                    }],
                });
            },
        }
    }

    Ok(built)
}

fn check_single(seen: &mut bool, child: &'static str) -> Result<(), MessageError> {
    if *seen {
        return Err(MessageError::TooMany {
            parent: "Template",
            child,
            max: 1,
        });
    }
    *seen = true;
    Ok(())
}

/// A template message, flattened and validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    name: String,
    language: Language,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<BuiltComponent>,
}

impl Template {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<Language>,
        components: Vec<TemplateComponent>,
    ) -> Result<Self, MessageError> {
        Ok(Self {
            name: name.into(),
            language: language.into(),
            components: build_components(components)?,
        })
    }
}

impl OutboundMessage for Template {
    fn message_type(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> TemplateComponent {
        BodyComponent::new(vec![BodyParameter::text(text).unwrap()]).into()
    }

    fn header() -> TemplateComponent {
        HeaderComponent::new(vec![HeaderParameter::text("Hi").unwrap()]).into()
    }

    #[test]
    fn sole_body_gets_the_large_ceiling() {
        let template = Template::new("t", "en", vec![body(&"x".repeat(2000))]);
        assert!(template.is_ok());
    }

    #[test]
    fn body_with_siblings_is_capped_at_1024() {
        assert_eq!(
            Template::new("t", "en", vec![header(), body(&"x".repeat(2000))]),
            Err(MessageError::TooLong {
                field: "template body text",
                max: 1024
            })
        );
        assert!(Template::new("t", "en", vec![header(), body(&"x".repeat(1024))]).is_ok());
    }

    #[test]
    fn body_text_never_exceeds_the_hard_ceiling() {
        assert_eq!(
            BodyParameter::text("x".repeat(32769)),
            Err(MessageError::TooLong {
                field: "template body text",
                max: 32768
            })
        );
    }

    #[test]
    fn skipped_buttons_reserve_an_index() {
        let template = Template::new(
            "t",
            "en",
            vec![
                ButtonComponent::url("a").unwrap().into(),
                ButtonComponent::skip().into(),
                ButtonComponent::quick_reply("b").unwrap().into(),
            ],
        )
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&template.to_wire().unwrap()).unwrap();
        let components = parsed["components"].as_array().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0]["sub_type"], "url");
        assert_eq!(components[0]["index"], 0);
        assert_eq!(components[1]["sub_type"], "quick_reply");
        assert_eq!(components[1]["index"], 2);
        assert_eq!(components[1]["parameters"][0]["payload"], "b");
    }

    #[test]
    fn duplicate_body_components_are_rejected() {
        assert_eq!(
            Template::new("t", "en", vec![body("a"), body("b")]),
            Err(MessageError::TooMany {
                parent: "Template",
                child: "body component",
                max: 1
            })
        );
    }

    #[test]
    fn empty_button_values_are_rejected() {
        assert_eq!(
            ButtonComponent::url(""),
            Err(MessageError::Empty {
                field: "url button text"
            })
        );
        assert_eq!(
            ButtonComponent::quick_reply(""),
            Err(MessageError::Empty {
                field: "quick reply payload"
            })
        );
        assert_eq!(
            ButtonComponent::copy_code(""),
            Err(MessageError::Empty {
                field: "coupon code"
            })
        );
    }

    #[test]
    fn mpm_multi_section_needs_titles() {
        let titled = ProductSection::titled("Top", vec![Product::new("p1")]).unwrap();
        let untitled = ProductSection::new(vec![Product::new("p2")]).unwrap();

        assert!(ButtonComponent::mpm(Product::new("thumb"), vec![untitled.clone()]).is_ok());
        assert_eq!(
            ButtonComponent::mpm(Product::new("thumb"), vec![titled, untitled]),
            Err(MessageError::UntitledSection { parent: "MpmButton" })
        );
    }

    #[test]
    fn carousel_cards_are_indexed_with_fresh_button_counters() {
        let card = |sku: &str| {
            CarouselCard::new(
                HeaderParameter::image(Image::from_id(sku)),
                vec![
                    body("hello"),
                    ButtonComponent::quick_reply("tap").unwrap().into(),
                ],
            )
            .unwrap()
        };
        let template = Template::new(
            "t",
            "en",
            vec![Carousel::new(vec![card("m1"), card("m2")]).unwrap().into()],
        )
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&template.to_wire().unwrap()).unwrap();
        let cards = parsed["components"][0]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["card_index"], 0);
        assert_eq!(cards[1]["card_index"], 1);
        // Each card: prepended image header, body, then its own button 0.
        assert_eq!(cards[1]["components"][0]["type"], "header");
        assert_eq!(cards[1]["components"][0]["parameters"][0]["image"]["id"], "m2");
        assert_eq!(cards[1]["components"][2]["index"], 0);
    }

    #[test]
    fn card_body_is_capped_because_of_the_prepended_header() {
        let result = CarouselCard::new(
            HeaderParameter::image(Image::from_id("m1")),
            vec![body(&"x".repeat(2000))],
        );
        assert_eq!(
            result,
            Err(MessageError::TooLong {
                field: "template body text",
                max: 1024
            })
        );
    }

    #[test]
    fn carousel_capacity() {
        let card = CarouselCard::new(
            HeaderParameter::image(Image::from_id("m")),
            vec![body("hi")],
        )
        .unwrap();
        assert_eq!(
            Carousel::new(vec![card; 11]),
            Err(MessageError::TooMany {
                parent: "Carousel",
                child: "cards",
                max: 10
            })
        );
    }

    #[test]
    fn limited_time_offer_wire_shape() {
        assert_eq!(
            LimitedTimeOffer::new(-1),
            Err(MessageError::NegativeExpiration)
        );

        let template = Template::new(
            "t",
            "en",
            vec![
                body("sale"),
                LimitedTimeOffer::new(1_700_000_000_000).unwrap().into(),
            ],
        )
        .unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&template.to_wire().unwrap()).unwrap();
        let lto = &parsed["components"][1];
        assert_eq!(lto["type"], "limited_time_offer");
        assert_eq!(
            lto["parameters"][0]["limited_time_offer"]["expiration_time_ms"],
            1_700_000_000_000_i64
        );
    }

    #[test]
    fn header_parameter_rules() {
        assert_eq!(
            HeaderParameter::text("x".repeat(61)),
            Err(MessageError::TooLong {
                field: "header text",
                max: 60
            })
        );
        assert_eq!(
            HeaderParameter::location(Location::new(0.0, 0.0).with_name("HQ")),
            Err(MessageError::LocationDetailRequired)
        );
        assert!(
            HeaderParameter::location(
                Location::new(0.0, 0.0).with_name("HQ").with_address("Main St 1")
            )
            .is_ok()
        );
    }

    #[test]
    fn currency_amount_must_be_positive() {
        assert_eq!(
            Currency::new(0, "USD", "$0"),
            Err(MessageError::NonPositiveAmount)
        );
        let currency = Currency::new(10_990, "USD", "$10.99").unwrap();
        let parameter = BodyParameter::currency(currency);
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json["type"], "currency");
        assert_eq!(json["currency"]["amount_1000"], 10_990);
    }

    #[test]
    fn named_body_parameters_carry_the_placeholder_name() {
        let parameter = BodyParameter::text("Maria").unwrap().named("customer");
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "Maria");
        assert_eq!(json["parameter_name"], "customer");
    }

    #[test]
    fn template_wire_shape_is_deterministic() {
        let make = || {
            Template::new(
                "order_update",
                "en_US",
                vec![
                    header(),
                    body("shipped"),
                    ButtonComponent::url("track/123").unwrap().into(),
                ],
            )
            .unwrap()
        };
        assert_eq!(make().to_wire().unwrap(), make().to_wire().unwrap());

        let parsed: serde_json::Value =
            serde_json::from_str(&make().to_wire().unwrap()).unwrap();
        assert_eq!(parsed["name"], "order_update");
        assert_eq!(parsed["language"]["code"], "en_US");
        assert_eq!(parsed["components"][2]["type"], "button");
        assert_eq!(parsed["components"][2]["parameters"][0]["type"], "text");
    }

    #[test]
    fn template_without_components_omits_the_array() {
        let wire = Template::new("hello_world", "en_US", Vec::new())
            .unwrap()
            .to_wire()
            .unwrap();
        assert_eq!(wire, r#"{"name":"hello_world","language":{"code":"en_US"}}"#);
    }
}
