use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uncertainty reported with every property sample.
pub const UNCERTAINTY_IN_MILLISECONDS: u32 = 100;

pub const POWER_CONTROLLER: &str = "Alexa.PowerController";
pub const TEMPERATURE_SENSOR: &str = "Alexa.TemperatureSensor";
pub const ENDPOINT_HEALTH: &str = "Alexa.EndpointHealth";

/// Value of a reported property. The wire shape differs per property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Plain string, e.g. `"ON"`.
    Text(String),
    /// `{"value": 21.5, "scale": "CELSIUS"}`
    Measurement { value: f32, scale: String },
    /// `{"value": "OK"}`
    Status { value: String },
}

/// A property represents some state of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub namespace: String,
    pub name: String,
    pub value: PropertyValue,
    pub time_of_sample: DateTime<Utc>,
    pub uncertainty_in_milliseconds: u32,
}

/// Properties of an endpoint reported along with a response.
/// Properties keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub properties: Vec<Property>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn add_property(&mut self, namespace: &str, name: &str, value: PropertyValue, time_of_sample: DateTime<Utc>) {
        self.properties.push(Property {
            namespace: namespace.to_string(),
            name: name.to_string(),
            value,
            time_of_sample,
            uncertainty_in_milliseconds: UNCERTAINTY_IN_MILLISECONDS,
        });
    }

    pub fn add_power_state(&mut self, on: bool, time_of_sample: DateTime<Utc>) {
        let value = if on { "ON" } else { "OFF" };
        self.add_property(
            POWER_CONTROLLER,
            "powerState",
            PropertyValue::Text(value.to_string()),
            time_of_sample,
        );
    }

    /// Adds a temperature in celsius, truncated (not rounded) to one decimal place.
    pub fn add_temperature(&mut self, celsius: f32, time_of_sample: DateTime<Utc>) {
        self.add_property(
            TEMPERATURE_SENSOR,
            "temperature",
            PropertyValue::Measurement {
                value: truncate_to_tenths(celsius),
                scale: "CELSIUS".to_string(),
            },
            time_of_sample,
        );
    }

    pub fn add_endpoint_health(&mut self, connected: bool, time_of_sample: DateTime<Utc>) {
        let value = if connected { "OK" } else { "UNREACHABLE" };
        self.add_property(
            ENDPOINT_HEALTH,
            "connectivity",
            PropertyValue::Status {
                value: value.to_string(),
            },
            time_of_sample,
        );
    }
}

fn truncate_to_tenths(value: f32) -> f32 {
    (value * 10.0).trunc() / 10.0
}
