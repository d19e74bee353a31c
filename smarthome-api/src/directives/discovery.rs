use crate::error::{DirectiveError, Result};
use crate::processor::DirectiveProcessor;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use smarthome_core::{Device, DiscoverableEndpoint, Directive, Header, Response};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const DISCOVERY: &str = "Alexa.Discovery";

/// Failures while loading the configured endpoint list.
#[derive(Error, Debug)]
pub enum EndpointsError {
    #[error("could not read endpoints: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not unmarshal endpoints: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct DiscoverPayload<'a, T> {
    endpoints: &'a [T],
}

/// Endpoint list as it was handed over. Descriptors read from JSON are
/// kept untouched so that categories, capabilities and attributes this
/// crate has no type for are echoed as well.
#[derive(Debug, Clone)]
enum Endpoints {
    Typed(Vec<DiscoverableEndpoint>),
    Raw(Vec<Map<String, Value>>),
}

/// Answers discovery directives with a statically configured endpoint list.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    endpoints: Option<Endpoints>,
}

impl Discovery {
    pub fn new(endpoints: Vec<DiscoverableEndpoint>) -> Self {
        Self {
            endpoints: Some(Endpoints::Typed(endpoints)),
        }
    }

    /// Discovery without endpoint list; every discovery directive fails.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Reads a JSON array of endpoint descriptor objects.
    pub fn from_reader(reader: impl Read) -> std::result::Result<Self, EndpointsError> {
        let endpoints: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
        Ok(Self {
            endpoints: Some(Endpoints::Raw(endpoints)),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, EndpointsError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Number of configured endpoints, `None` when unconfigured.
    pub fn endpoint_count(&self) -> Option<usize> {
        match self.endpoints.as_ref()? {
            Endpoints::Typed(endpoints) => Some(endpoints.len()),
            Endpoints::Raw(endpoints) => Some(endpoints.len()),
        }
    }
}

#[async_trait]
impl DirectiveProcessor for Discovery {
    fn name(&self) -> &'static str {
        "discovery"
    }

    fn is_capable(&self, directive: &Directive) -> bool {
        directive.header.namespace == DISCOVERY
    }

    async fn process(&self, directive: &Directive, _device: Option<&dyn Device>) -> Result<Response> {
        if !self.is_capable(directive) {
            return Err(DirectiveError::IncompatibleDirective);
        }

        let payload = match self.endpoints.as_ref().ok_or(DirectiveError::EndpointsMissing)? {
            Endpoints::Typed(endpoints) => serde_json::to_value(DiscoverPayload { endpoints })?,
            Endpoints::Raw(endpoints) => serde_json::to_value(DiscoverPayload { endpoints })?,
        };

        Ok(Response::new(Header::new(DISCOVERY, "Discover.Response")).with_payload(payload))
    }
}
