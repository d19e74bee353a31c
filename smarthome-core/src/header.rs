use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Payload version of every message produced by this crate.
pub const PAYLOAD_VERSION: &str = "3";

/// A Header has a set of expected fields that are the same across message types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message_id: String,
    /// An empty token is the same as no token.
    #[serde(default, skip_serializing_if = "is_blank", deserialize_with = "blank_as_none")]
    pub correlation_token: Option<String>,
    #[serde(default)]
    pub payload_version: String,
}

fn is_blank(token: &Option<String>) -> bool {
    token.as_deref().map_or(true, str::is_empty)
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|token| !token.is_empty()))
}

impl Header {
    /// Creates an outbound header with a fresh message id.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            message_id: Uuid::new_v4().to_string(),
            correlation_token: None,
            payload_version: PAYLOAD_VERSION.to_string(),
        }
    }

    pub fn with_correlation_token(mut self, token: Option<String>) -> Self {
        self.correlation_token = token;
        self
    }
}
