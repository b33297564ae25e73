//! Error types for the SpySerp API client.
//!
//! # Design
//! Errors are split by the stage that failed: configuration is checked
//! before anything leaves the process, the transport covers the HTTP
//! round-trip, and decoding covers the response body. Application errors the
//! vendor embeds inside a JSON payload are not errors at this layer; they are
//! returned to the caller as part of the decoded value.

use thiserror::Error;

/// Boxed cause carried by `TransportError`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `SpySerpClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token or host is unusable; no request was attempted.
    #[error("invalid client configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The HTTP exchange did not complete.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON. `body` holds the bytes as
    /// received, which may not be UTF-8.
    #[error("response (HTTP {status}) is not valid JSON: {source}")]
    Decode {
        status: u16,
        body: Vec<u8>,
        #[source]
        source: serde_json::Error,
    },

    /// A request parameter could not be encoded as JSON.
    #[error("request parameters could not be serialized: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Problems with the token/host pair or with loading it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API token is empty")]
    EmptyToken,

    #[error("API host is empty")]
    EmptyHost,

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Failure to connect, send the request, or read the response.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
