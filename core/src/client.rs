//! Request envelope construction and response decoding for the SpySerp API.
//!
//! # Design
//! `SpySerpClient` holds a `ClientConfig` and a `Transport`. Each call is
//! split into `build_request`, which validates the configuration and produces
//! an `HttpRequest`, and `parse_response`, which decodes an `HttpResponse`.
//! `invoke` runs both around a single `Transport::execute`. The method
//! bindings in `methods` are thin wrappers over `invoke`.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::RequestEnvelope;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Params;
use crate::transport::{Transport, UreqTransport};

/// Value of the `Content-Type` header on every call.
pub const CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// Client for the SpySerp JSON API.
///
/// Configuration is checked on every call rather than at construction, so a
/// client can be created with an empty token and fixed up with `set_token`
/// before first use.
#[derive(Debug, Clone)]
pub struct SpySerpClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl SpySerpClient<UreqTransport> {
    /// Client for the production endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(token))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }
}

impl<T: Transport> SpySerpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.config.token = token.into();
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.config.host = host.into();
    }

    pub fn token(&self) -> &str {
        &self.config.token
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the POST request for `method` without sending it.
    pub fn build_request(&self, method: &str, params: impl Into<Params>) -> Result<HttpRequest, ApiError> {
        self.config.validate()?;
        let params = params.into().into_map()?;
        let body = RequestEnvelope::new(method, &self.config.token, params).to_json();
        Ok(HttpRequest {
            url: self.config.host.clone(),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
                ("Content-Length".to_string(), body.len().to_string()),
            ],
            body,
        })
    }

    /// Decode the response body as JSON, whatever the status code.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            warn!(status = response.status, "SpySerp answered with a non-success status");
        }
        match serde_json::from_slice(&response.body) {
            Ok(value) => Ok(value),
            Err(source) => {
                warn!(
                    status = response.status,
                    content_type = response.header("content-type").unwrap_or("<none>"),
                    bytes = response.body.len(),
                    "SpySerp response is not JSON"
                );
                Err(ApiError::Decode {
                    status: response.status,
                    body: response.body,
                    source,
                })
            }
        }
    }

    /// Call a vendor method by its wire name.
    ///
    /// The decoded response is returned as-is; error objects the vendor puts
    /// in the payload are left for the caller to inspect.
    pub fn invoke(&self, method: &str, params: impl Into<Params>) -> Result<Value, ApiError> {
        let request = self.build_request(method, params)?;
        debug!(method, host = %request.url, bytes = request.body.len(), "calling SpySerp");
        let response = self.transport.execute(&request).map_err(|e| {
            warn!(method, error = %e, "SpySerp request failed");
            e
        })?;
        self.parse_response(response)
    }
}
