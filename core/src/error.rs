//! Error types for the EAN client.
//!
//! # Design
//! A 403 from the vendor's API gateway is classified into the closed
//! `Denial` enumeration by the substring the gateway puts in the body.
//! Errors reported inside a JSON body (`EanWsError`) get their own variants,
//! with `MultipleLocations` carrying the candidates the caller can resubmit
//! against.

use serde_json::Value;
use thiserror::Error;

use crate::client::root_object;
use crate::types::{Location, WsError};

const MULTIPLE_LOCATIONS: &str = "Multiple locations";
const INVALID_DATA: &str = "Data in this request could not be validated";

/// Why the API gateway refused a request with HTTP 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denial {
    Forbidden,
    NotAuthorized,
    DeveloperInactive,
    QueryLimit,
    RateLimit,
    OverCapacity,
    AuthenticationFailure,
    Unknown,
}

impl Denial {
    /// Body substrings in the order they are tested.
    pub const PATTERNS: [(&'static str, Denial); 7] = [
        ("Forbidden", Denial::Forbidden),
        ("Not Authorized", Denial::NotAuthorized),
        ("Developer Inactive", Denial::DeveloperInactive),
        ("Queries Per Second Limit", Denial::QueryLimit),
        ("Account Over Rate Limit", Denial::RateLimit),
        ("Rate Limit Exceeded", Denial::OverCapacity),
        ("Authentication Failure", Denial::AuthenticationFailure),
    ];

    pub fn classify(body: &str) -> Self {
        Self::PATTERNS
            .iter()
            .find(|(pattern, _)| body.contains(pattern))
            .map(|(_, denial)| *denial)
            .unwrap_or(Denial::Unknown)
    }

    /// Fixed message for this denial. `Unknown` has none; the body is used.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Denial::Forbidden => Some("Forbidden: the request was refused by the API gateway"),
            Denial::NotAuthorized => {
                Some("Not authorized: the API key is missing or not valid for this service")
            }
            Denial::DeveloperInactive => {
                Some("Developer inactive: the API key has not been activated or was disabled")
            }
            Denial::QueryLimit => {
                Some("Query limit: the account exceeded its queries-per-second limit")
            }
            Denial::RateLimit => Some("Rate limit: the account exceeded its request quota"),
            Denial::OverCapacity => {
                Some("Over capacity: the service rate limit was exceeded, try again later")
            }
            Denial::AuthenticationFailure => {
                Some("Authentication failure: the request signature did not validate")
            }
            Denial::Unknown => None,
        }
    }
}

/// Errors returned by `EanClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 403 from the API gateway.
    #[error("{message}")]
    Denied { denial: Denial, message: String },

    /// `EanWsError` without a more specific classification.
    #[error("{0}")]
    Service(WsError),

    /// The destination was ambiguous; `locations` lists the candidates.
    #[error("{error} ({} candidate locations)", .locations.len())]
    MultipleLocations {
        error: WsError,
        locations: Vec<Location>,
    },

    /// The vendor rejected the request parameters.
    #[error("invalid data: {0}")]
    InvalidData(WsError),

    /// No response was obtained at all.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Classify a 403 body.
    pub fn denied(body: &str) -> Self {
        let denial = Denial::classify(body);
        let message = match denial.message() {
            Some(message) => message.to_string(),
            None => format!("Unknown 403 response: {body}"),
        };
        ApiError::Denied { denial, message }
    }

    /// Inspect a parsed body for `<root>.EanWsError`. `None` means success.
    pub fn from_body(body: &Value) -> Option<Self> {
        let root = root_object(body)?;
        let ws_error: WsError = serde_json::from_value(root.get("EanWsError")?.clone()).ok()?;
        let message = ws_error.presentation_message.as_deref()?;

        if message.contains(MULTIPLE_LOCATIONS) {
            let locations = root
                .get("LocationInfos")
                .and_then(|infos| infos.get("LocationInfo"))
                .map(parse_locations)
                .unwrap_or_default();
            return Some(ApiError::MultipleLocations {
                error: ws_error,
                locations,
            });
        }
        if message.contains(INVALID_DATA) {
            return Some(ApiError::InvalidData(ws_error));
        }
        Some(ApiError::Service(ws_error))
    }

    pub fn denial(&self) -> Option<Denial> {
        match self {
            ApiError::Denied { denial, .. } => Some(*denial),
            _ => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        self.denial().is_some()
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self.denial(),
            Some(Denial::QueryLimit | Denial::RateLimit | Denial::OverCapacity)
        )
    }

    pub fn is_multiple_locations(&self) -> bool {
        matches!(self, ApiError::MultipleLocations { .. })
    }

    pub fn is_invalid_data(&self) -> bool {
        matches!(self, ApiError::InvalidData(_))
    }

    /// Candidate locations, empty unless this is `MultipleLocations`.
    pub fn locations(&self) -> &[Location] {
        match self {
            ApiError::MultipleLocations { locations, .. } => locations,
            _ => &[],
        }
    }

    /// The vendor error object for body-level errors.
    pub fn ws_error(&self) -> Option<&WsError> {
        match self {
            ApiError::Service(error)
            | ApiError::InvalidData(error)
            | ApiError::MultipleLocations { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// The vendor collapses one-element arrays into a bare object.
fn parse_locations(value: &Value) -> Vec<Location> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Value::Object(_) => serde_json::from_value(value.clone()).into_iter().collect(),
        _ => Vec::new(),
    }
}
