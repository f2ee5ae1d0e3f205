//! Request descriptors and their encoding into URLs or form bodies.
//!
//! # Design
//! `ApiRequest` says *what* to call; `encode` decides *how* it goes on the
//! wire by folding in the credentials from `Config` and the session fields.
//! Parameters are kept as an ordered list so the produced query string is
//! deterministic. No validation is done: whatever the caller passes is
//! escaped and sent.

use md5::{Digest, Md5};
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, FORM_CONTENT_TYPE};
use crate::session::Session;

/// How a request is authenticated and transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub include_key: bool,
    pub include_cid: bool,
    /// Use HTTPS and the booking host.
    pub secure: bool,
    /// Send parameters as a form body instead of a query string.
    pub form: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            include_key: true,
            include_cid: true,
            secure: false,
            form: false,
        }
    }
}

/// A call to one API method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: String,
    pub params: Vec<(String, String)>,
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
            options: RequestOptions::default(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn secure(mut self) -> Self {
        self.options.secure = true;
        self
    }

    pub fn form(mut self) -> Self {
        self.options.form = true;
        self
    }

    pub fn without_key(mut self) -> Self {
        self.options.include_key = false;
        self
    }

    pub fn without_cid(mut self) -> Self {
        self.options.include_cid = false;
        self
    }

    pub fn list() -> Self {
        Self::new("list")
    }

    pub fn info() -> Self {
        Self::new("info")
    }

    pub fn avail() -> Self {
        Self::new("avail")
    }

    pub fn room_images() -> Self {
        Self::new("roomImages")
    }

    pub fn rules() -> Self {
        Self::new("rules")
    }

    pub fn geo_search() -> Self {
        Self::new("geoSearch")
    }

    pub fn payment_info() -> Self {
        Self::new("paymentInfo")
    }

    pub fn itinerary() -> Self {
        Self::new("itin")
    }

    pub fn cancel() -> Self {
        Self::new("cancel")
    }

    pub fn ping() -> Self {
        Self::new("ping")
    }

    /// Bookings carry card data, so they go over HTTPS as a form post.
    pub fn reservation() -> Self {
        Self::new("res").secure().form()
    }
}

/// Parameters that identify the caller rather than what is asked for.
const CREDENTIAL_PARAMS: [&str; 3] = ["apiKey", "cid", "sig"];

/// The wire form of an `ApiRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// Full URL including the query string, or the bare endpoint for forms.
    pub url: String,
    /// Form parameters when the request is sent as a body.
    pub form: Option<Vec<(String, String)>>,
}

impl EncodedRequest {
    pub fn is_form(&self) -> bool {
        self.form.is_some()
    }

    /// Value of the first parameter named `name`, from the query or form.
    pub fn param(&self, name: &str) -> Option<String> {
        match &self.form {
            Some(form) => form.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone()),
            None => {
                let (_, query) = self.url.split_once('?')?;
                let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
                pairs.into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
            }
        }
    }

    /// Endpoint plus every parameter except the credentials, so requests
    /// that differ in session fields or host never share a key.
    pub fn cache_key(&self) -> String {
        let (endpoint, pairs) = match &self.form {
            Some(form) => (self.url.as_str(), form.clone()),
            None => match self.url.split_once('?') {
                Some((endpoint, query)) => (
                    endpoint,
                    serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default(),
                ),
                None => (self.url.as_str(), Vec::new()),
            },
        };
        let kept: Vec<(String, String)> = pairs
            .into_iter()
            .filter(|(name, _)| !CREDENTIAL_PARAMS.contains(&name.as_str()))
            .collect();
        let query = serde_urlencoded::to_string(&kept).unwrap_or_default();
        format!("{endpoint}?{query}")
    }

    pub fn into_http_request(self) -> Result<HttpRequest, ApiError> {
        match self.form {
            None => Ok(HttpRequest {
                method: HttpMethod::Get,
                url: self.url,
                headers: Vec::new(),
                body: None,
            }),
            Some(form) => {
                let body = serde_urlencoded::to_string(&form)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                Ok(HttpRequest {
                    method: HttpMethod::Post,
                    url: self.url,
                    headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
                    body: Some(body),
                })
            }
        }
    }
}

/// `sig` parameter: hex MD5 of key, secret and Unix time in seconds.
pub fn signature(api_key: &str, shared_secret: &str, unix_seconds: u64) -> String {
    let mut hasher = Md5::new();
    hasher.update(api_key.as_bytes());
    hasher.update(shared_secret.as_bytes());
    hasher.update(unix_seconds.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fold credentials and session fields into `request`.
pub fn encode(
    config: &Config,
    request: &ApiRequest,
    session: Option<&Session>,
    unix_seconds: u64,
) -> EncodedRequest {
    let options = request.options;
    let mut params = request.params.clone();

    if options.include_key {
        params.push(("apiKey".to_string(), config.api_key.clone()));
    }
    if options.include_cid {
        params.push(("cid".to_string(), config.cid().to_string()));
    }
    if config.uses_signature() {
        let secret = config.shared_secret.as_deref().unwrap_or_default();
        params.push((
            "sig".to_string(),
            signature(&config.api_key, secret, unix_seconds),
        ));
    }
    if let Some(minor_rev) = config.minor_rev {
        params.push(("minorRev".to_string(), minor_rev.to_string()));
    }
    if let Some(session) = session {
        params.extend(
            session
                .query_params()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value)),
        );
    }

    let endpoint = config.endpoint(&request.method, options.secure);
    debug!(method = %request.method, endpoint = %endpoint, form = options.form, "encoded request");

    if options.form {
        return EncodedRequest {
            url: endpoint,
            form: Some(params),
        };
    }
    // A list of string pairs always serializes.
    let query = serde_urlencoded::to_string(&params).unwrap_or_default();
    let url = if query.is_empty() {
        endpoint
    } else {
        format!("{endpoint}?{query}")
    };
    EncodedRequest { url, form: None }
}
