use serde::{Deserialize, Serialize};

/// Caller-defined properties of an endpoint, used as lookup key when a
/// device gets created for a directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub cookie_type: String,
    #[serde(default)]
    pub name: String,
}

impl Cookie {
    pub fn new(
        id: impl Into<String>,
        cookie_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            cookie_type: cookie_type.into(),
            name: name.into(),
        }
    }
}

/// Authentication scope of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "type", default)]
    pub scope_type: String,
    #[serde(default)]
    pub token: String,
}

/// Identifies the target of a directive and the origin of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub endpoint_id: String,
    #[serde(default)]
    pub cookie: Cookie,
}
