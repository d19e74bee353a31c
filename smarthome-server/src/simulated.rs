// In-memory devices backing the shipped binary

use parking_lot::Mutex;
use smarthome_api::DeviceFactory;
use smarthome_core::{Device, EndpointHealth, PowerDevice, TemperatureSensor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Power states of all simulated switches, keyed by endpoint id.
type PowerStates = Arc<Mutex<HashMap<String, bool>>>;

/// Hands out simulated devices by cookie type:
/// `switch` and `light` are power devices remembering their state per
/// endpoint id, `thermometer` reports a fixed temperature.
pub struct SimulatedDeviceFactory {
    power_states: PowerStates,
    temperature: f32,
}

impl SimulatedDeviceFactory {
    pub fn new() -> Self {
        Self {
            power_states: Arc::new(Mutex::new(HashMap::new())),
            temperature: 21.5,
        }
    }

    pub fn with_temperature(mut self, celsius: f32) -> Self {
        self.temperature = celsius;
        self
    }

    pub fn power_state(&self, endpoint_id: &str) -> bool {
        self.power_states.lock().get(endpoint_id).copied().unwrap_or(false)
    }
}

impl Default for SimulatedDeviceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceFactory for SimulatedDeviceFactory {
    fn new_device(&self, endpoint_type: &str, endpoint_id: &str) -> anyhow::Result<Box<dyn Device>> {
        match endpoint_type {
            "switch" | "light" => Ok(Box::new(SimulatedSwitch {
                id: endpoint_id.to_string(),
                states: self.power_states.clone(),
            })),
            "thermometer" => Ok(Box::new(SimulatedThermometer {
                celsius: self.temperature,
            })),
            other => anyhow::bail!("unknown endpoint type '{}' for endpoint {}", other, endpoint_id),
        }
    }
}

struct SimulatedSwitch {
    id: String,
    states: PowerStates,
}

impl PowerDevice for SimulatedSwitch {
    fn set_power_state(&self, on: bool) -> anyhow::Result<bool> {
        debug!("Switching {} {}", self.id, if on { "on" } else { "off" });
        self.states.lock().insert(self.id.clone(), on);
        Ok(on)
    }

    fn power_state(&self) -> anyhow::Result<bool> {
        Ok(self.states.lock().get(&self.id).copied().unwrap_or(false))
    }
}

impl EndpointHealth for SimulatedSwitch {
    fn is_connected(&self) -> bool {
        true
    }
}

impl Device for SimulatedSwitch {
    fn as_power_device(&self) -> Option<&dyn PowerDevice> {
        Some(self)
    }

    fn as_endpoint_health(&self) -> Option<&dyn EndpointHealth> {
        Some(self)
    }
}

struct SimulatedThermometer {
    celsius: f32,
}

impl TemperatureSensor for SimulatedThermometer {
    fn temperature(&self) -> f32 {
        self.celsius
    }
}

impl EndpointHealth for SimulatedThermometer {
    fn is_connected(&self) -> bool {
        true
    }
}

impl Device for SimulatedThermometer {
    fn as_temperature_sensor(&self) -> Option<&dyn TemperatureSensor> {
        Some(self)
    }

    fn as_endpoint_health(&self) -> Option<&dyn EndpointHealth> {
        Some(self)
    }
}
