//! Client configuration and how it is loaded.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Partner id sent when none is configured.
pub const DEFAULT_CID: &str = "55505";

/// Host for ordinary requests.
pub const API_HOST: &str = "api.ean.com";

/// Host for requests that must go over HTTPS (bookings).
pub const BOOKING_HOST: &str = "book.api.ean.com";

pub const SERVICE_PATH: &str = "/ean-services/rs/hotel/v3";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing config value: {0}")]
    MissingValue(&'static str),
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Storage consulted by `EanClient::call` before dispatching a query
/// request. No implementation ships with the client.
pub trait ResponseCache: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&self, key: &str, value: &Value);
}

/// Credentials and endpoint settings read on every request.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    /// Partner id; `DEFAULT_CID` when unset.
    pub cid: Option<String>,
    pub shared_secret: Option<String>,
    /// Sign requests with `sig` instead of relying on the key alone.
    #[serde(default)]
    pub signature_auth: bool,
    pub minor_rev: Option<u32>,
    /// Replaces `http(s)://<host>` in every endpoint, e.g. a test server.
    pub base_url: Option<String>,
    #[serde(skip)]
    pub cache: Option<Arc<dyn ResponseCache>>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cid: None,
            shared_secret: None,
            signature_auth: false,
            minor_rev: None,
            base_url: None,
            cache: None,
        }
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    /// Enable signature auth with `shared_secret`.
    pub fn with_signature(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = Some(shared_secret.into());
        self.signature_auth = true;
        self
    }

    pub fn with_minor_rev(mut self, minor_rev: u32) -> Self {
        self.minor_rev = Some(minor_rev);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Read `EAN_API_KEY`, `EAN_CID`, `EAN_SHARED_SECRET`,
    /// `EAN_SIGNATURE_AUTH`, `EAN_MINOR_REV` and `EAN_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("EAN_API_KEY").ok_or(ConfigError::MissingValue("EAN_API_KEY"))?;
        let mut config = Config::new(api_key);
        config.cid = lookup("EAN_CID");
        config.shared_secret = lookup("EAN_SHARED_SECRET");
        config.signature_auth = match lookup("EAN_SIGNATURE_AUTH").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::InvalidValue(format!(
                    "EAN_SIGNATURE_AUTH={other}"
                )))
            }
        };
        if let Some(raw) = lookup("EAN_MINOR_REV") {
            let minor_rev = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("EAN_MINOR_REV={raw}")))?;
            config.minor_rev = Some(minor_rev);
        }
        if let Some(base_url) = lookup("EAN_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingValue("api_key"));
        }
        if self.signature_auth && self.shared_secret.is_none() {
            return Err(ConfigError::MissingValue("shared_secret"));
        }
        Ok(self)
    }

    pub fn cid(&self) -> &str {
        self.cid.as_deref().unwrap_or(DEFAULT_CID)
    }

    pub fn has_cid(&self) -> bool {
        self.cid.is_some()
    }

    pub fn uses_signature(&self) -> bool {
        self.signature_auth
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Endpoint URL for `method`, without a query string.
    pub fn endpoint(&self, method: &str, secure: bool) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{SERVICE_PATH}/{method}"),
            None if secure => format!("https://{BOOKING_HOST}{SERVICE_PATH}/{method}"),
            None => format!("http://{API_HOST}{SERVICE_PATH}/{method}"),
        }
    }
}
