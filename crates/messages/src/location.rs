//! Location messages.

use serde::Serialize;

use crate::OutboundMessage;

/// A pin-drop location message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    longitude: f64,
    latitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            name: None,
            address: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

impl OutboundMessage for Location {
    fn message_type(&self) -> &'static str {
        "location"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_coordinates_skip_optional_fields() {
        let wire = Location::new(13.4, 52.5).to_wire().unwrap();
        assert_eq!(wire, r#"{"longitude":13.4,"latitude":52.5}"#);
    }

    #[test]
    fn named_location_carries_both_fields() {
        let loc = Location::new(13.4, 52.5)
            .with_name("Office")
            .with_address("Unter den Linden 1");
        let parsed: serde_json::Value = serde_json::from_str(&loc.to_wire().unwrap()).unwrap();
        assert_eq!(parsed["name"], "Office");
        assert_eq!(parsed["address"], "Unter den Linden 1");
    }
}
