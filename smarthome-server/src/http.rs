// HTTP transport: basic auth, directive envelope in, event envelope out

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use smarthome_api::Dispatcher;
use smarthome_core::Directive;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::validator::ResponseValidator;

/// Credentials a request must carry in its `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, headers: &HeaderMap) -> bool {
        match credentials(headers) {
            Some((username, password)) => username == self.username && password == self.password,
            None => false,
        }
    }
}

/// Decodes `Authorization: Basic base64(user:password)`.
fn credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub basic_auth: Option<BasicAuth>,
    pub validator: Option<Arc<dyn ResponseValidator>>,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            basic_auth: None,
            validator: None,
        }
    }

    pub fn with_basic_auth(mut self, basic_auth: BasicAuth) -> Self {
        self.basic_auth = Some(basic_auth);
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn ResponseValidator>) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Every method on `/` is treated as a directive request.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handle_directive))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_directive(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Some(basic_auth) = &state.basic_auth {
        if !basic_auth.verify(&headers) {
            warn!("Unauthorized request rejected");
            return plain_text(StatusCode::UNAUTHORIZED);
        }
    }

    let directive = match Directive::from_envelope(&body) {
        Ok(directive) => directive,
        Err(err) => {
            warn!("Unable to handle request, {}: {}", err, String::from_utf8_lossy(&body));
            return plain_text(StatusCode::BAD_REQUEST);
        }
    };

    let response = state.dispatcher.dispatch(&directive).await;

    let payload = match encode_json(&response) {
        Ok(payload) => payload,
        Err(failure) => return failure,
    };

    if let Some(validator) = &state.validator {
        validate_on_demand(validator.as_ref(), &payload).await;
    }

    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

/// Logs the validation outcome; the answer sent is never affected.
async fn validate_on_demand(validator: &dyn ResponseValidator, payload: &[u8]) {
    let started = Instant::now();

    match validator.validate(payload).await {
        Ok(()) => debug!(
            "Response validated without errors within {:.3}s (Schema: {})",
            started.elapsed().as_secs_f64(),
            validator.schema_reference()
        ),
        Err(err) => warn!(
            "Response validation failed\npayload:\n{}\nerrors: {}",
            String::from_utf8_lossy(payload),
            err
        ),
    }
}

/// Serializes an outgoing body; failure is a server fault, not a bad request.
fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, Response> {
    serde_json::to_vec(value).map_err(|err| {
        error!("Unable to serialize response, {}", err);
        plain_text(StatusCode::INTERNAL_SERVER_ERROR)
    })
}

fn plain_text(status: StatusCode) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain")],
        status.canonical_reason().unwrap_or_default(),
    )
        .into_response()
}
