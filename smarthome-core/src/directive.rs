use crate::endpoint::Endpoint;
use crate::error::{DirectiveParseError, Result};
use crate::header::Header;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A directive sent by Alexa.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directive {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

/// Removes `key` from a JSON object. `null` counts as absent, anything
/// other than an object is rejected.
fn take_object(object: &mut Map<String, Value>, key: &'static str) -> Result<Option<Map<String, Value>>> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(_) => Err(DirectiveParseError::NotAnObject(key)),
    }
}

fn from_object<T: DeserializeOwned>(object: Map<String, Value>) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(object))?)
}

fn parse_endpoint(mut endpoint: Map<String, Value>) -> Result<Endpoint> {
    for key in ["scope", "cookie"] {
        if let Some(inner) = take_object(&mut endpoint, key)? {
            endpoint.insert(key.to_string(), Value::Object(inner));
        }
    }
    from_object(endpoint)
}

impl Directive {
    /// Parses a request body of the form `{"directive": {...}}`.
    ///
    /// Unknown fields are ignored. Fails on malformed JSON, a body or
    /// directive that is not a JSON object, a missing `directive` key or a
    /// directive without header.
    pub fn from_envelope(body: &[u8]) -> Result<Self> {
        let mut envelope: Map<String, Value> = serde_json::from_slice(body)?;
        let directive = take_object(&mut envelope, "directive")?.ok_or(DirectiveParseError::MissingDirective)?;
        Self::from_map(directive)
    }

    /// Parses the bare directive object (the value of the `directive` key).
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_map(serde_json::from_slice(data)?)
    }

    fn from_map(mut directive: Map<String, Value>) -> Result<Self> {
        let header = take_object(&mut directive, "header")?.ok_or(DirectiveParseError::MissingHeader)?;
        let endpoint = take_object(&mut directive, "endpoint")?
            .map(parse_endpoint)
            .transpose()?;
        let payload = take_object(&mut directive, "payload")?.unwrap_or_default();

        Ok(Self {
            header: from_object(header)?,
            endpoint,
            payload,
        })
    }

    /// Looks up a string nested one object deep in the payload,
    /// e.g. `payload.grant.code`.
    pub fn payload_str(&self, object: &str, key: &str) -> Option<&str> {
        self.payload
            .get(object)
            .and_then(Value::as_object)
            .and_then(|inner| inner.get(key))
            .and_then(Value::as_str)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.header.namespace, self.header.name)?;

        if let Some(endpoint) = &self.endpoint {
            write!(f, " ({})", endpoint.cookie.name)?;
        }

        Ok(())
    }
}
