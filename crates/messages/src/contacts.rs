//! Contact card messages.
//!
//! A contact is assembled from a heterogeneous list of components. Name,
//! birthday and organization may appear at most once per contact; addresses,
//! emails, phones and urls repeat and accumulate into plural array fields.
//! Unlike every other message type, the wire payload is a bare JSON array of
//! contact records rather than an object.

use serde::Serialize;

use crate::{MessageError, OutboundMessage};

/// Structured name. Requires at least one detail field besides the
/// formatted display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactName {
    formatted_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
}

impl ContactName {
    pub fn new(formatted_name: impl Into<String>) -> Self {
        Self {
            formatted_name: formatted_name.into(),
            ..Self::default()
        }
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn middle_name(mut self, value: impl Into<String>) -> Self {
        self.middle_name = Some(value.into());
        self
    }

    pub fn suffix(mut self, value: impl Into<String>) -> Self {
        self.suffix = Some(value.into());
        self
    }

    pub fn prefix(mut self, value: impl Into<String>) -> Self {
        self.prefix = Some(value.into());
        self
    }

    fn has_detail(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.middle_name.is_some()
            || self.suffix.is_some()
            || self.prefix.is_some()
    }
}

/// Birthday, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Birthday(String);

impl Birthday {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, MessageError> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(MessageError::InvalidBirthday);
        }
        Ok(Self(format!("{year:04}-{month:02}-{day:02}")))
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Employer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Organization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, value: impl Into<String>) -> Self {
        self.company = Some(value.into());
        self
    }

    pub fn department(mut self, value: impl Into<String>) -> Self {
        self.department = Some(value.into());
        self
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }
}

/// Postal address. `kind` is the card label, e.g. `HOME` or `WORK`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_code: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn street(mut self, value: impl Into<String>) -> Self {
        self.street = Some(value.into());
        self
    }

    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    pub fn zip(mut self, value: impl Into<String>) -> Self {
        self.zip = Some(value.into());
        self
    }

    pub fn country(mut self, value: impl Into<String>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn country_code(mut self, value: impl Into<String>) -> Self {
        self.country_code = Some(value.into());
        self
    }

    pub fn kind(mut self, value: impl Into<String>) -> Self {
        self.kind = Some(value.into());
        self
    }
}

/// Email address entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    email: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            kind: None,
        }
    }

    pub fn kind(mut self, value: impl Into<String>) -> Self {
        self.kind = Some(value.into());
        self
    }
}

/// Phone number entry. `wa_id` links the entry to a WhatsApp account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    phone: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wa_id: Option<String>,
}

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            kind: None,
            wa_id: None,
        }
    }

    pub fn kind(mut self, value: impl Into<String>) -> Self {
        self.kind = Some(value.into());
        self
    }

    pub fn wa_id(mut self, value: impl Into<String>) -> Self {
        self.wa_id = Some(value.into());
        self
    }
}

/// Website entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url {
    url: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl Url {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: None,
        }
    }

    pub fn kind(mut self, value: impl Into<String>) -> Self {
        self.kind = Some(value.into());
        self
    }
}

/// One building block of a contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactComponent {
    Name(ContactName),
    Birthday(Birthday),
    Organization(Organization),
    Address(Address),
    Email(Email),
    Phone(Phone),
    Url(Url),
}

impl ContactComponent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Birthday(_) => "birthday",
            Self::Organization(_) => "org",
            Self::Address(_) => "address",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::Url(_) => "url",
        }
    }
}

macro_rules! component_from {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for ContactComponent {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

component_from!(ContactName => Name);
component_from!(Birthday => Birthday);
component_from!(Organization => Organization);
component_from!(Address => Address);
component_from!(Email => Email);
component_from!(Phone => Phone);
component_from!(Url => Url);

/// A fully assembled contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday: Option<Birthday>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    emails: Vec<Email>,
    name: ContactName,
    #[serde(skip_serializing_if = "Option::is_none")]
    org: Option<Organization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    phones: Vec<Phone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    urls: Vec<Url>,
}

/// A contacts message: one or more contact records.
///
/// Serializes as a bare JSON array, not an object. The `/messages` request
/// still carries it under the `contacts` key like any other payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Contacts(Vec<ContactRecord>);

impl Contacts {
    /// Assemble one record per component list.
    pub fn new<I>(contacts: I) -> Result<Self, MessageError>
    where
        I: IntoIterator<Item = Vec<ContactComponent>>,
    {
        let records = contacts
            .into_iter()
            .map(assemble_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(records))
    }
}

fn assemble_record(components: Vec<ContactComponent>) -> Result<ContactRecord, MessageError> {
    let mut name: Option<ContactName> = None;
    let mut birthday: Option<Birthday> = None;
    let mut org: Option<Organization> = None;
    let mut addresses = Vec::new();
    let mut emails = Vec::new();
    let mut phones = Vec::new();
    let mut urls = Vec::new();

    for component in components {
        let kind = component.kind();
        match component {
            ContactComponent::Name(n) => {
                set_unique(&mut name, n, kind)?;
            },
            ContactComponent::Birthday(b) => {
                set_unique(&mut birthday, b, kind)?;
            },
            ContactComponent::Organization(o) => {
                set_unique(&mut org, o, kind)?;
            },
            ContactComponent::Address(a) => addresses.push(a),
            ContactComponent::Email(e) => emails.push(e),
            ContactComponent::Phone(p) => phones.push(p),
            ContactComponent::Url(u) => urls.push(u),
        }
    }

    let name = name.ok_or(MessageError::MissingContactName)?;
    if !name.has_detail() {
        return Err(MessageError::NameDetailRequired);
    }

    Ok(ContactRecord {
        addresses,
        birthday,
        emails,
        name,
        org,
        phones,
        urls,
    })
}

fn set_unique<T>(
    slot: &mut Option<T>,
    value: T,
    component: &'static str,
) -> Result<(), MessageError> {
    if slot.is_some() {
        return Err(MessageError::DuplicateContactComponent { component });
    }
    *slot = Some(value);
    Ok(())
}

impl OutboundMessage for Contacts {
    fn message_type(&self) -> &'static str {
        "contacts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(first: &str) -> ContactComponent {
        ContactName::new(format!("{first} Doe")).first_name(first).into()
    }

    #[test]
    fn two_names_in_one_contact_are_rejected() {
        assert_eq!(
            Contacts::new([vec![named("John"), named("Jane")]]),
            Err(MessageError::DuplicateContactComponent { component: "name" })
        );
    }

    #[test]
    fn repeatable_components_accumulate() {
        let contacts = Contacts::new([vec![
            named("John"),
            Address::new().city("Berlin").into(),
            Address::new().city("Hamburg").kind("WORK").into(),
        ]])
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&contacts.to_wire().unwrap()).unwrap();
        assert!(parsed.is_array());
        let addresses = parsed[0]["addresses"].as_array().unwrap();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[1]["type"], "WORK");
    }

    #[test]
    fn contact_without_name_is_rejected() {
        assert_eq!(
            Contacts::new([vec![ContactComponent::from(Email::new("j@example.com"))]]),
            Err(MessageError::MissingContactName)
        );
    }

    #[test]
    fn formatted_name_alone_is_not_enough() {
        assert_eq!(
            Contacts::new([vec![ContactName::new("John Doe").into()]]),
            Err(MessageError::NameDetailRequired)
        );
    }

    #[test]
    fn unique_components_allowed_once() {
        let contacts = Contacts::new([vec![
            named("John"),
            Birthday::new(1990, 2, 28).unwrap().into(),
            Organization::new().company("ACME").title("CTO").into(),
            Phone::new("+15551234567").wa_id("15551234567").into(),
        ]])
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&contacts.to_wire().unwrap()).unwrap();
        assert_eq!(parsed[0]["birthday"], "1990-02-28");
        assert_eq!(parsed[0]["org"]["company"], "ACME");
        assert_eq!(parsed[0]["phones"][0]["wa_id"], "15551234567");
    }

    #[test]
    fn birthday_validates_calendar_dates() {
        assert!(Birthday::new(2000, 2, 29).is_ok());
        assert_eq!(Birthday::new(1999, 2, 29), Err(MessageError::InvalidBirthday));
        assert_eq!(Birthday::new(1999, 13, 1), Err(MessageError::InvalidBirthday));
        assert_eq!(Birthday::new(1999, 4, 31), Err(MessageError::InvalidBirthday));
    }
}
