//! Customer session state carried between calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::client::root_object;

/// A vendor browsing session. Every field is optional; only the ones that
/// are set are sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Option<String>,
    pub ip_address: Option<String>,
    pub locale: Option<String>,
    pub currency_code: Option<String>,
    pub user_agent: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_ip_address(&self) -> bool {
        self.ip_address.is_some()
    }

    pub fn has_locale(&self) -> bool {
        self.locale.is_some()
    }

    pub fn has_currency_code(&self) -> bool {
        self.currency_code.is_some()
    }

    pub fn has_user_agent(&self) -> bool {
        self.user_agent.is_some()
    }

    /// Request parameters for the fields that are set, in wire order.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        [
            ("customerSessionId", &self.id),
            ("customerIpAddress", &self.ip_address),
            ("locale", &self.locale),
            ("currencyCode", &self.currency_code),
            ("customerUserAgent", &self.user_agent),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone())))
        .collect()
    }
}

/// Copy `<root>.customerSessionId` from a parsed body into `session`,
/// creating the session if the caller had none.
pub fn propagate(body: &Value, session: &mut Option<Session>) {
    let Some(id) = root_object(body)
        .and_then(|root| root.get("customerSessionId"))
        .and_then(Value::as_str)
    else {
        return;
    };
    trace!(session_id = id, "propagating customer session");
    session.get_or_insert_with(Session::default).id = Some(id.to_string());
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_session_has_no_params() {
        let session = Session::new();
        assert!(session.query_params().is_empty());
        assert!(!session.has_id());
        assert!(!session.has_locale());
    }

    #[test]
    fn query_params_only_include_set_fields() {
        let session = Session::new()
            .with_id("s-1")
            .with_currency_code("EUR")
            .with_user_agent("Mozilla/5.0");
        assert_eq!(
            session.query_params(),
            vec![
                ("customerSessionId", "s-1".to_string()),
                ("currencyCode", "EUR".to_string()),
                ("customerUserAgent", "Mozilla/5.0".to_string()),
            ]
        );
        assert!(session.has_user_agent());
        assert!(!session.has_ip_address());
    }

    #[test]
    fn propagate_updates_existing_session() {
        let mut session = Some(Session::new().with_id("old").with_locale("en_US"));
        let body = json!({"HotelListResponse": {"customerSessionId": "abc123"}});
        propagate(&body, &mut session);
        let session = session.unwrap();
        assert_eq!(session.id.as_deref(), Some("abc123"));
        assert_eq!(session.locale.as_deref(), Some("en_US"));
    }

    #[test]
    fn propagate_creates_session_when_absent() {
        let mut session = None;
        let body = json!({"HotelInformationResponse": {"customerSessionId": "new-id"}});
        propagate(&body, &mut session);
        assert_eq!(session, Some(Session::new().with_id("new-id")));
    }

    #[test]
    fn propagate_leaves_session_alone_without_id() {
        let mut session = Some(Session::new().with_id("keep"));
        propagate(&json!({"PingResponse": {"echo": "hi"}}), &mut session);
        assert_eq!(session.unwrap().id.as_deref(), Some("keep"));

        let mut none = None;
        propagate(&json!({"PingResponse": {}}), &mut none);
        assert!(none.is_none());
    }

    #[test]
    fn propagate_only_reads_first_root() {
        let mut session = None;
        let body = json!({
            "HotelListResponse": {"cachedSupplierResponse": {}},
            "Other": {"customerSessionId": "ignored"}
        });
        propagate(&body, &mut session);
        assert!(session.is_none());
    }

    #[test]
    fn session_survives_a_json_round_trip() {
        let session = Session::new()
            .with_id("abc123")
            .with_ip_address("10.0.0.1")
            .with_currency_code("USD");
        let stored = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, session);
        assert!(restored.has_id());
        assert!(!restored.has_locale());
    }
}
