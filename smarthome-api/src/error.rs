use smarthome_core::AlexaError;
use thiserror::Error;

/// Failures a directive processor can run into.
///
/// Only [`DirectiveError::Alexa`] carries the vendor taxonomy; everything
/// else becomes an `INTERNAL_ERROR` when converted into an [`AlexaError`].
#[derive(Error, Debug)]
pub enum DirectiveError {
    #[error(transparent)]
    Alexa(#[from] AlexaError),

    #[error("incompatible directive")]
    IncompatibleDirective,

    #[error("authority is missing")]
    AuthorityMissing,

    #[error("endpoints not specified")]
    EndpointsMissing,

    #[error("endpoint device does not support {0}")]
    UnsupportedCapability(&'static str),

    #[error(transparent)]
    Device(anyhow::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, DirectiveError>;

impl From<DirectiveError> for AlexaError {
    fn from(err: DirectiveError) -> Self {
        match err {
            DirectiveError::Alexa(alexa) => alexa,
            other => AlexaError::internal(other.to_string()),
        }
    }
}
