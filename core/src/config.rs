//! Credentials and endpoint for the SpySerp API.
//!
//! # Design
//! `ClientConfig` is plain data. Nothing is validated when it is built or
//! mutated; `validate` runs at the start of every call, so a client holding a
//! bad token only fails once a request is attempted.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Production endpoint of the vendor API.
pub const DEFAULT_HOST: &str = "https://spyserp.com/panel/api";

pub const TOKEN_ENV: &str = "SPYSERP_TOKEN";
pub const HOST_ENV: &str = "SPYSERP_HOST";
pub const TIMEOUT_ENV: &str = "SPYSERP_TIMEOUT_SECS";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// Token, host and optional request timeout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub token: String,
    #[serde(default = "default_host")]
    pub host: String,
    /// Whole-request timeout in seconds. `None` waits indefinitely.
    #[serde(default, rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            host: default_host(),
            timeout: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `SPYSERP_TOKEN`, `SPYSERP_HOST` and `SPYSERP_TIMEOUT_SECS`.
    ///
    /// Only the token is mandatory; an unset host falls back to
    /// [`DEFAULT_HOST`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_ENV).ok_or(ConfigError::MissingEnv(TOKEN_ENV))?;
        let mut config = Self::new(token);
        if let Some(host) = lookup(HOST_ENV) {
            config.host = host;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Check that token and host can be used for a call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .finish()
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
