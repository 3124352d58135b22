//! Validation errors for outbound message construction.

use thiserror::Error;

/// Errors raised while assembling a message payload.
///
/// Every variant is a terminal, constructor-time failure: no partially
/// validated message object ever escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("{parent} can't have more than {max} {child}")]
    TooMany {
        parent: &'static str,
        child: &'static str,
        max: usize,
    },

    #[error("{parent} must have at least one {child}")]
    AtLeastOne {
        parent: &'static str,
        child: &'static str,
    },

    #[error("{field} can't be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} can't be empty")]
    Empty { field: &'static str },

    #[error("{field} can't have leading or trailing spaces")]
    Padded { field: &'static str },

    #[error("{field} can't contain emojis")]
    EmojiNotAllowed { field: &'static str },

    #[error("reply buttons must have unique {field}s")]
    DuplicateButton { field: &'static str },

    #[error("{parent} sections must all have titles when more than one is given")]
    UntitledSection { parent: &'static str },

    #[error("contact already has a {component} component")]
    DuplicateContactComponent { component: &'static str },

    #[error("contact must have a name component")]
    MissingContactName,

    #[error(
        "contact name must have at least one of first_name, last_name, middle_name, suffix or prefix"
    )]
    NameDetailRequired,

    #[error("birthday must be a valid YYYY-MM-DD date")]
    InvalidBirthday,

    #[error("interactive message must have a body component")]
    BodyRequired,

    #[error("interactive message with a product action can't have a header")]
    HeaderNotAllowed,

    #[error("header of type text is required for {action} action")]
    TextHeaderRequired { action: &'static str },

    #[error("a location header parameter must have both a name and an address")]
    LocationDetailRequired,

    #[error("currency amount_1000 must be greater than 0")]
    NonPositiveAmount,

    #[error("limited-time offer expiration can't be negative")]
    NegativeExpiration,

    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for MessageError {
    fn from(err: serde_json::Error) -> Self {
        MessageError::Serialize(err.to_string())
    }
}
