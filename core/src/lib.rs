//! Synchronous client core for the EAN hotel-booking API.
//!
//! # Overview
//! Builds signed request URLs, parses JSON responses and turns the vendor's
//! error signals into typed errors. Session ids returned by the API are
//! carried forward into the caller's `Session`.
//!
//! # Design
//! - `EanClient` holds only a `Config`; there is no global state.
//! - Each call is split into `build_request` (produces an `EncodedRequest`)
//!   and `parse_response` (consumes an `HttpResponse`), so the I/O boundary
//!   is explicit. `EanClient::call` joins them through a `Transport`.
//! - Successful payloads are returned as `serde_json::Value`; only the
//!   objects the error handler inspects are typed.

pub mod amenity;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod session;
pub mod types;

pub use amenity::Amenity;
pub use client::EanClient;
pub use config::{Config, ConfigError, ResponseCache};
pub use error::{ApiError, Denial};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use request::{ApiRequest, EncodedRequest, RequestOptions};
pub use session::Session;
pub use types::{Location, WsError};
