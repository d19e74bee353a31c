use crate::error::{DirectiveError, Result};
use crate::processor::DirectiveProcessor;
use async_trait::async_trait;
use smarthome_core::{Clock, Context, Device, Directive, Response, SystemClock};
use std::sync::Arc;

/// Reports the current state of a device (`ReportState`).
///
/// Power state and temperature are alternatives: a device offering both
/// only reports its power state. Connectivity is reported in addition to
/// either of them.
pub struct Report {
    clock: Arc<dyn Clock>,
}

impl Report {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectiveProcessor for Report {
    fn name(&self) -> &'static str {
        "report"
    }

    fn is_capable(&self, directive: &Directive) -> bool {
        directive.header.namespace == "Alexa"
    }

    async fn process(&self, directive: &Directive, device: Option<&dyn Device>) -> Result<Response> {
        if !self.is_capable(directive) {
            return Err(DirectiveError::IncompatibleDirective);
        }

        let mut context = Context::new();

        if let Some(device) = device {
            if let Some(power) = device.as_power_device() {
                let state = power.power_state().map_err(DirectiveError::Device)?;
                context.add_power_state(state, self.clock.now());
            } else if let Some(sensor) = device.as_temperature_sensor() {
                context.add_temperature(sensor.temperature(), self.clock.now());
            }

            if let Some(health) = device.as_endpoint_health() {
                context.add_endpoint_health(health.is_connected(), self.clock.now());
            }
        }

        Ok(Response::for_directive(directive, "Alexa", "StateReport").with_context(context))
    }
}
