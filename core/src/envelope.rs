//! The JSON object sent as the body of every call.

use serde_json::{Map, Value};

/// `{method, token, ...params}` for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    fields: Map<String, Value>,
}

impl RequestEnvelope {
    /// Base keys go in first; a parameter named `method` or `token`
    /// replaces the base value.
    pub fn new(method: &str, token: &str, params: Map<String, Value>) -> Self {
        let mut fields = Map::with_capacity(params.len() + 2);
        fields.insert("method".to_string(), Value::String(method.to_string()));
        fields.insert("token".to_string(), Value::String(token.to_string()));
        fields.extend(params);
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_json(&self) -> String {
        // A map of `Value`s always has string keys, so encoding cannot fail.
        Value::Object(self.fields.clone()).to_string()
    }
}
