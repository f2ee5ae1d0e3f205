//! Vendor DTOs that the client interprets itself.
//!
//! # Design
//! Successful payloads are returned as `serde_json::Value` because every
//! endpoint has its own shape. Only the objects the error handler needs to
//! look inside are typed here. The vendor encodes ids and enum-like fields
//! as either strings or numbers depending on the endpoint, so those fields
//! are read leniently into strings.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A destination candidate returned when a location search is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "lenient_required")]
    pub destination_id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(rename = "stateProvinceCode", default, deserialize_with = "lenient_string")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country_code: Option<String>,
}

/// The vendor's `EanWsError` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsError {
    #[serde(default, deserialize_with = "lenient_string")]
    pub presentation_message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub verbose_message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub handling: Option<String>,
}

impl WsError {
    pub fn message(&self) -> &str {
        self.presentation_message.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for WsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_reads_vendor_field_names() {
        let json = r#"{
            "@order": "0",
            "destinationId": "A1B2C3",
            "type": 1,
            "city": "Springfield",
            "stateProvinceCode": "IL",
            "countryCode": "US"
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.destination_id, "A1B2C3");
        assert_eq!(location.kind.as_deref(), Some("1"));
        assert_eq!(location.city.as_deref(), Some("Springfield"));
        assert_eq!(location.province.as_deref(), Some("IL"));
        assert_eq!(location.country_code.as_deref(), Some("US"));
    }

    #[test]
    fn location_tolerates_missing_fields() {
        let location: Location = serde_json::from_str(r#"{"destinationId": 42}"#).unwrap();
        assert_eq!(location.destination_id, "42");
        assert!(location.city.is_none());
        assert!(location.province.is_none());
    }

    #[test]
    fn ws_error_message_defaults_to_empty() {
        let error: WsError = serde_json::from_str(r#"{"category": "EXCEPTION"}"#).unwrap();
        assert_eq!(error.message(), "");
        assert_eq!(error.category.as_deref(), Some("EXCEPTION"));
    }

    #[test]
    fn ws_error_displays_presentation_message() {
        let error = WsError {
            presentation_message: Some("TravelNow.com cannot service this request.".to_string()),
            ..Default::default()
        };
        assert_eq!(error.to_string(), "TravelNow.com cannot service this request.");
    }
}
