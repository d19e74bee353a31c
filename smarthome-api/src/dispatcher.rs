// Dispatches directives to the first capable processor

use crate::directives::{Authorization, Discovery, PowerController, Report};
use crate::factory::DeviceFactory;
use crate::processor::DirectiveProcessor;
use smarthome_core::{AlexaError, Clock, Device, Directive, Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument, Span};

/// Holds an ordered list of directive processors and turns every
/// directive into a response.
///
/// Processors are asked in registration order; the first capable one
/// wins. A processor placed in front of a default one therefore shadows
/// it for the namespaces both handle.
pub struct Dispatcher {
    processors: Vec<Arc<dyn DirectiveProcessor>>,
    device_factory: Option<Arc<dyn DeviceFactory>>,
    span: Span,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            device_factory: None,
            span: info_span!("dispatcher"),
        }
    }

    /// Dispatcher handling all supported directive families:
    /// Authorization, Discovery, PowerController and Report.
    pub fn with_default_processors(
        authorization: Authorization,
        discovery: Discovery,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_processor(Arc::new(authorization));
        dispatcher.add_processor(Arc::new(discovery));
        dispatcher.add_processor(Arc::new(PowerController::with_clock(clock.clone())));
        dispatcher.add_processor(Arc::new(Report::with_clock(clock)));
        dispatcher
    }

    pub fn with_device_factory(mut self, factory: Arc<dyn DeviceFactory>) -> Self {
        self.device_factory = Some(factory);
        self
    }

    /// Parent span of every dispatched directive.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends a processor; it is asked after all registered ones.
    pub fn add_processor(&mut self, processor: Arc<dyn DirectiveProcessor>) {
        self.processors.push(processor);
    }

    /// Inserts a processor in front of all registered ones.
    pub fn prepend_processor(&mut self, processor: Arc<dyn DirectiveProcessor>) {
        self.processors.insert(0, processor);
    }

    pub fn processor_names(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Processes a directive. Never fails: every error is rendered as an
    /// `ErrorResponse` for the directive.
    pub async fn dispatch(&self, directive: &Directive) -> Response {
        let span = info_span!(
            parent: &self.span,
            "directive",
            directive = %directive,
            correlation_token = directive.header.correlation_token.as_deref().unwrap_or_default(),
        );

        self.dispatch_inner(directive).instrument(span).await
    }

    async fn dispatch_inner(&self, directive: &Directive) -> Response {
        let started = Instant::now();
        info!("Received directive {}", directive);

        let Some(processor) = self.processors.iter().find(|p| p.is_capable(directive)) else {
            warn!("No processor capable of {}", directive);
            return Response::from_error(directive, &AlexaError::invalid_directive("Directive not supported"));
        };

        let device = self.create_device(directive);

        let response = match processor.process(directive, device.as_deref()).await {
            Ok(response) => response,
            Err(err) => {
                warn!(processor = processor.name(), "Processing {} failed: {}", directive, err);
                Response::from_error(directive, &AlexaError::from(err))
            }
        };

        info!(
            "Processed {} in {:.3}s",
            directive,
            started.elapsed().as_secs_f64()
        );

        response
    }

    fn create_device(&self, directive: &Directive) -> Option<Box<dyn Device>> {
        let endpoint = directive.endpoint.as_ref()?;

        let Some(factory) = &self.device_factory else {
            warn!("No device factory configured, {} is processed without device", directive);
            return None;
        };

        match factory.new_device(&endpoint.cookie.cookie_type, &endpoint.cookie.id) {
            Ok(device) => Some(device),
            Err(err) => {
                warn!("Unable to create endpoint device ({})", err);
                None
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
