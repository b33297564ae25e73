//! Named call parameters and the "unset" sentinel.
//!
//! The vendor expects every documented parameter to be present; one that the
//! caller did not supply is sent as boolean `false`. Both `Params::optional`
//! and the `#[serde(with = "unset")]` fields of option structs go through
//! [`unset::serialize`], so that choice lives in one place.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Wire value standing for "parameter not supplied".
pub const UNSET: bool = false;

/// Serde helper writing `None` as [`UNSET`] and `Some(v)` as `v`.
pub mod unset {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_bool(UNSET),
        }
    }
}

/// Wire value of a flag the vendor documents as an integer: `1` or `0`.
pub fn flag(on: bool) -> u8 {
    u8::from(on)
}

/// Serde helper for integer flags: `None` as [`UNSET`], `Some(b)` as [`flag`].
pub mod unset_flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        unset::serialize(&value.map(flag), serializer)
    }
}

struct OrUnset<'a, T>(&'a Option<T>);

impl<T: Serialize> Serialize for OrUnset<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        unset::serialize(self.0, serializer)
    }
}

/// Parameters of one call, keyed by their wire names.
///
/// Encoding errors are held back until [`Params::into_map`] so bindings can
/// chain every field without intermediate `?`.
#[derive(Debug, Default)]
pub struct Params {
    map: Map<String, Value>,
    error: Option<serde_json::Error>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter the caller always supplies.
    pub fn required(mut self, key: &str, value: impl Serialize) -> Self {
        let encoded = serde_json::to_value(value);
        self.insert(key, encoded);
        self
    }

    /// Insert a parameter that is sent as [`UNSET`] when absent.
    pub fn optional<T: Serialize>(mut self, key: &str, value: Option<T>) -> Self {
        let encoded = serde_json::to_value(OrUnset(&value));
        self.insert(key, encoded);
        self
    }

    /// Merge every field of a struct that serializes to a JSON object.
    pub fn extend(mut self, fields: impl Serialize) -> Self {
        match serde_json::to_value(fields) {
            Ok(Value::Object(fields)) => self.map.extend(fields),
            Ok(other) => self.fail(serde::ser::Error::custom(format!(
                "expected a JSON object of parameters, got {other}"
            ))),
            Err(e) => self.fail(e),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn into_map(self) -> Result<Map<String, Value>, ApiError> {
        match self.error {
            Some(e) => Err(ApiError::Serialization(e)),
            None => Ok(self.map),
        }
    }

    fn insert(&mut self, key: &str, encoded: Result<Value, serde_json::Error>) {
        match encoded {
            Ok(value) => {
                self.map.insert(key.to_string(), value);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: serde_json::Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self { map, error: None }
    }
}
