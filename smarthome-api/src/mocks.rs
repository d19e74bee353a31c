// Hand-written collaborators for the unit tests

use crate::authority::{AccessTokens, Authority};
use crate::error::{DirectiveError, Result};
use crate::factory::DeviceFactory;
use crate::processor::DirectiveProcessor;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use smarthome_core::{
    AlexaError, Device, Directive, EndpointHealth, FixedClock, PowerDevice, Response,
    TemperatureSensor,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn sample_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 2, 24, 16, 42, 5).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(sample_time()))
}

pub fn directive(json: &str) -> Directive {
    Directive::from_slice(json.as_bytes()).unwrap()
}

/// Directive with correlation token and an endpoint cookie of type
/// `testing` and id `ABC-123`.
pub fn endpoint_directive(namespace: &str, name: &str) -> Directive {
    directive(&format!(
        r#"{{
            "header": {{
                "namespace": "{namespace}",
                "name": "{name}",
                "payloadVersion": "3",
                "messageId": "message-1",
                "correlationToken": "correlation-1"
            }},
            "endpoint": {{
                "scope": {{"type": "BearerToken", "token": "access-token"}},
                "endpointId": "endpoint-1",
                "cookie": {{"id": "ABC-123", "type": "testing", "name": "Test Lamp"}}
            }},
            "payload": {{}}
        }}"#
    ))
}

/// Device whose capabilities are switched on by setting the fields.
#[derive(Default)]
pub struct MockDevice {
    pub power: Option<bool>,
    pub power_error: Option<&'static str>,
    pub temperature: Option<f32>,
    pub connected: Option<bool>,
    pub set_calls: Mutex<Vec<bool>>,
    pub state_reads: AtomicUsize,
}

impl MockDevice {
    pub fn power(state: bool) -> Self {
        Self {
            power: Some(state),
            ..Self::default()
        }
    }

    pub fn failing_power(message: &'static str) -> Self {
        Self {
            power: Some(false),
            power_error: Some(message),
            ..Self::default()
        }
    }

    pub fn thermometer(celsius: f32) -> Self {
        Self {
            temperature: Some(celsius),
            ..Self::default()
        }
    }

    pub fn with_health(mut self, connected: bool) -> Self {
        self.connected = Some(connected);
        self
    }

    pub fn set_calls(&self) -> Vec<bool> {
        self.set_calls.lock().clone()
    }
}

impl PowerDevice for MockDevice {
    fn set_power_state(&self, on: bool) -> anyhow::Result<bool> {
        self.set_calls.lock().push(on);
        if let Some(message) = self.power_error {
            anyhow::bail!("{}", message);
        }
        Ok(on)
    }

    fn power_state(&self) -> anyhow::Result<bool> {
        self.state_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.power_error {
            anyhow::bail!("{}", message);
        }
        Ok(self.power.unwrap_or_default())
    }
}

impl TemperatureSensor for MockDevice {
    fn temperature(&self) -> f32 {
        self.temperature.unwrap_or_default()
    }
}

impl EndpointHealth for MockDevice {
    fn is_connected(&self) -> bool {
        self.connected.unwrap_or_default()
    }
}

impl Device for MockDevice {
    fn as_power_device(&self) -> Option<&dyn PowerDevice> {
        self.power.is_some().then_some(self as &dyn PowerDevice)
    }

    fn as_temperature_sensor(&self) -> Option<&dyn TemperatureSensor> {
        self.temperature.is_some().then_some(self as &dyn TemperatureSensor)
    }

    fn as_endpoint_health(&self) -> Option<&dyn EndpointHealth> {
        self.connected.is_some().then_some(self as &dyn EndpointHealth)
    }
}

/// Lets a test keep hold of the device handed out by [`MockDeviceFactory`].
pub struct SharedDevice(pub Arc<MockDevice>);

impl Device for SharedDevice {
    fn as_power_device(&self) -> Option<&dyn PowerDevice> {
        self.0.as_power_device()
    }

    fn as_temperature_sensor(&self) -> Option<&dyn TemperatureSensor> {
        self.0.as_temperature_sensor()
    }

    fn as_endpoint_health(&self) -> Option<&dyn EndpointHealth> {
        self.0.as_endpoint_health()
    }
}

/// Factory returning the configured device, or an error when none is set.
#[derive(Default)]
pub struct MockDeviceFactory {
    pub device: Option<Arc<MockDevice>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockDeviceFactory {
    pub fn returning(device: Arc<MockDevice>) -> Self {
        Self {
            device: Some(device),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

impl DeviceFactory for MockDeviceFactory {
    fn new_device(&self, endpoint_type: &str, endpoint_id: &str) -> anyhow::Result<Box<dyn Device>> {
        self.calls
            .lock()
            .push((endpoint_type.to_string(), endpoint_id.to_string()));

        match &self.device {
            Some(device) => Ok(Box::new(SharedDevice(device.clone()))),
            None => anyhow::bail!("no device of type {} with id {}", endpoint_type, endpoint_id),
        }
    }
}

pub enum Outcome {
    Respond,
    Tagged(AlexaError),
    Untagged(&'static str),
}

/// Processor capable of one namespace, answering with a `name`d header.
pub struct MockProcessor {
    pub namespace: &'static str,
    pub name: &'static str,
    pub outcome: Outcome,
    pub calls: AtomicUsize,
    pub saw_device: Mutex<Vec<bool>>,
}

impl MockProcessor {
    pub fn new(namespace: &'static str, name: &'static str, outcome: Outcome) -> Self {
        Self {
            namespace,
            name,
            outcome,
            calls: AtomicUsize::new(0),
            saw_device: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectiveProcessor for MockProcessor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_capable(&self, directive: &Directive) -> bool {
        directive.header.namespace == self.namespace
    }

    async fn process(&self, directive: &Directive, device: Option<&dyn Device>) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saw_device.lock().push(device.is_some());

        match &self.outcome {
            Outcome::Respond => Ok(Response::for_directive(directive, "Test", self.name)),
            Outcome::Tagged(err) => Err(err.clone().into()),
            Outcome::Untagged(message) => Err(DirectiveError::Device(anyhow::anyhow!("{}", message))),
        }
    }
}

/// Authority recording every grant request.
#[derive(Default)]
pub struct MockAuthority {
    pub reject_with: Option<&'static str>,
    pub grants: Mutex<Vec<(String, String, AccessTokens)>>,
}

impl MockAuthority {
    pub fn rejecting(message: &'static str) -> Self {
        Self {
            reject_with: Some(message),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Authority for MockAuthority {
    fn client_id(&self) -> &str {
        "client-id"
    }

    fn client_secret(&self) -> &str {
        "client-secret"
    }

    async fn accept_grant(
        &self,
        email: &str,
        bearer_token: &str,
        tokens: &AccessTokens,
    ) -> anyhow::Result<()> {
        self.grants
            .lock()
            .push((email.to_string(), bearer_token.to_string(), tokens.clone()));

        match self.reject_with {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }
}
