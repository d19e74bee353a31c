use crate::context::Context;
use crate::directive::Directive;
use crate::endpoint::Endpoint;
use crate::error::AlexaError;
use crate::header::Header;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The event part of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Response sent back to Alexa. Built fresh for every directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    pub event: Event,
}

impl Response {
    pub fn new(header: Header) -> Self {
        Self {
            context: None,
            event: Event {
                header,
                endpoint: None,
                payload: None,
            },
        }
    }

    /// Response answering `directive`: echoes correlation token and
    /// endpoint, with an empty payload.
    pub fn for_directive(directive: &Directive, namespace: &str, name: &str) -> Self {
        let header = Header::new(namespace, name)
            .with_correlation_token(directive.header.correlation_token.clone());

        let mut response = Self::new(header).with_payload(json!({}));
        response.event.endpoint = directive.endpoint.clone();
        response
    }

    /// `ErrorResponse` event for a directive that failed.
    pub fn from_error(directive: &Directive, error: &AlexaError) -> Self {
        Self::for_directive(directive, error.namespace(), "ErrorResponse").with_payload(json!({
            "type": error.error_type.as_str(),
            "message": error.message,
        }))
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.event.payload = Some(payload);
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }
}
