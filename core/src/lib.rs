//! Blocking client for the SpySerp rank-tracking API.
//!
//! # Overview
//! Every vendor call is a POST of one JSON object, the envelope
//! `{method, token, ...params}`, to a single URL; the JSON response is handed
//! back as a `serde_json::Value` without interpretation.
//!
//! # Design
//! - `SpySerpClient::build_request` and `SpySerpClient::parse_response` never
//!   touch the network; `invoke` joins them through a `Transport`.
//! - `UreqTransport` is the default transport; tests plug in their own.
//! - Token and host are validated on each call, not when set.
//! - Transport and decode failures are returned as `ApiError`, never fatal.
//! - The per-method bindings in `methods` are generated from one table.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
mod methods;
pub mod params;
pub mod transport;
pub mod types;

pub use client::SpySerpClient;
pub use config::{ClientConfig, DEFAULT_HOST};
pub use envelope::RequestEnvelope;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use params::{Params, UNSET};
pub use transport::{Transport, UreqTransport};
pub use types::{DomainType, KeywordRename, StatisticOptions};
