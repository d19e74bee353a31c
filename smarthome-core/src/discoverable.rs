// Descriptors of the endpoints reported to Alexa during discovery

use crate::endpoint::Cookie;
use serde::{Deserialize, Serialize};

/// Category used by the Alexa app to group an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayCategory {
    Light,
    Switch,
    Smartplug,
    TemperatureSensor,
    Thermostat,
    Other,
}

/// Supported property name of a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supported {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    pub supported: Vec<Supported>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

/// Functionality an endpoint offers to Alexa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    #[serde(rename = "type")]
    pub capability_type: String,
    pub interface: String,
    pub version: String,
    pub properties: CapabilityProperties,
}

impl Capability {
    /// Retrievable, not proactively reported `AlexaInterface` capability.
    pub fn new(interface: impl Into<String>, supported: &[&str]) -> Self {
        Self {
            capability_type: "AlexaInterface".to_string(),
            interface: interface.into(),
            version: "3".to_string(),
            properties: CapabilityProperties {
                supported: supported
                    .iter()
                    .map(|name| Supported {
                        name: name.to_string(),
                    })
                    .collect(),
                proactively_reported: false,
                retrievable: true,
            },
        }
    }
}

/// A discoverable device controlled with Alexa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverableEndpoint {
    pub endpoint_id: String,
    pub friendly_name: String,
    pub description: String,
    pub manufacturer_name: String,
    pub display_categories: Vec<DisplayCategory>,
    pub cookie: Cookie,
    pub capabilities: Vec<Capability>,
}
