//! Request builder and response parser for the EAN hotel API.
//!
//! # Design
//! `EanClient` holds only its `Config`. Each call is split into
//! `build_request`, which produces an `EncodedRequest`, and
//! `parse_response`, which consumes an `HttpResponse`. `call` wires the two
//! together through a `Transport` for callers that don't need the split.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpResponse, Transport};
use crate::request::{encode, ApiRequest, EncodedRequest};
use crate::session::{self, Session};

/// Synchronous client for the EAN hotel API.
#[derive(Debug, Clone)]
pub struct EanClient {
    config: Config,
}

impl EanClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_request(&self, request: &ApiRequest, session: Option<&Session>) -> EncodedRequest {
        self.build_request_at(request, session, unix_now())
    }

    /// As `build_request`, signing with the given Unix time.
    pub fn build_request_at(
        &self,
        request: &ApiRequest,
        session: Option<&Session>,
        unix_seconds: u64,
    ) -> EncodedRequest {
        encode(&self.config, request, session, unix_seconds)
    }

    /// Interpret a response: 403s become `ApiError::Denied`, everything else
    /// must be JSON. On success the session id is copied into `session`.
    pub fn parse_response(
        &self,
        response: HttpResponse,
        session: &mut Option<Session>,
    ) -> Result<Value, ApiError> {
        if response.status == 403 {
            let err = ApiError::denied(&response.body);
            warn!(denial = ?err.denial(), "request denied");
            return Err(err);
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if let Some(err) = ApiError::from_body(&body) {
            warn!(status = response.status, error = %err, "vendor error");
            return Err(err);
        }

        session::propagate(&body, session);
        Ok(body)
    }

    /// Build, dispatch and parse `request` in one step.
    pub fn call<T>(
        &self,
        transport: &T,
        request: &ApiRequest,
        session: &mut Option<Session>,
    ) -> Result<Value, ApiError>
    where
        T: Transport + ?Sized,
    {
        // A session that already has an id is mid-conversation with the
        // vendor; its responses are never shared.
        let in_session = session.as_ref().is_some_and(Session::has_id);
        let cache = self
            .config
            .cache
            .as_ref()
            .filter(|_| !request.options.form && !in_session);

        let encoded = self.build_request(request, session.as_ref());
        let cache_key = encoded.cache_key();
        if let Some(cached) = cache.and_then(|c| c.get(&cache_key)) {
            debug!(method = %request.method, "served from cache");
            session::propagate(&cached, session);
            return Ok(cached);
        }

        let response = transport.execute(&encoded.into_http_request()?)?;
        let body = self.parse_response(response, session)?;

        if let Some(cache) = cache {
            cache.put(&cache_key, &body);
        }
        Ok(body)
    }
}

/// The object under the first top-level key of a response body.
pub(crate) fn root_object(body: &Value) -> Option<&Map<String, Value>> {
    body.as_object()?.values().next()?.as_object()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
