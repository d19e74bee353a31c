use crate::error::{DirectiveError, Result};
use crate::processor::DirectiveProcessor;
use async_trait::async_trait;
use smarthome_core::context::POWER_CONTROLLER;
use smarthome_core::{AlexaError, Clock, Context, Device, Directive, Response, SystemClock};
use std::sync::Arc;

/// Processes `TurnOn` and `TurnOff` directives to switch power devices.
pub struct PowerController {
    clock: Arc<dyn Clock>,
}

impl PowerController {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for PowerController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectiveProcessor for PowerController {
    fn name(&self) -> &'static str {
        "power_controller"
    }

    fn is_capable(&self, directive: &Directive) -> bool {
        directive.header.namespace == POWER_CONTROLLER
    }

    async fn process(&self, directive: &Directive, device: Option<&dyn Device>) -> Result<Response> {
        if !self.is_capable(directive) {
            return Err(DirectiveError::IncompatibleDirective);
        }

        let turn_on = match directive.header.name.as_str() {
            "TurnOn" => true,
            "TurnOff" => false,
            _ => {
                return Err(AlexaError::invalid_directive(
                    "directive name should be TurnOn or TurnOff",
                )
                .into())
            }
        };

        let power = device
            .and_then(|device| device.as_power_device())
            .ok_or(DirectiveError::UnsupportedCapability("change of powerState"))?;

        let state = power
            .set_power_state(turn_on)
            .map_err(DirectiveError::Device)?;

        let mut context = Context::new();
        context.add_power_state(state, self.clock.now());

        Ok(Response::for_directive(directive, "Alexa", "Response").with_context(context))
    }
}
