use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types understood by Alexa in an `ErrorResponse` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// The directive is malformed or not supported by this skill.
    InvalidDirective,
    /// Anything that cannot be described by a more specific type.
    InternalError,
    /// The authority refused to grant access to the user.
    AcceptGrantFailed,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidDirective => "INVALID_DIRECTIVE",
            ErrorType::InternalError => "INTERNAL_ERROR",
            ErrorType::AcceptGrantFailed => "ACCEPT_GRANT_FAILED",
        }
    }

    /// Namespace of the `ErrorResponse` event carrying this type.
    pub fn namespace(&self) -> &'static str {
        match self {
            ErrorType::InvalidDirective | ErrorType::InternalError => "Alexa",
            ErrorType::AcceptGrantFailed => "Alexa.Authorization",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error tagged with the Alexa error taxonomy, ready to be rendered
/// into an `ErrorResponse`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AlexaError {
    pub error_type: ErrorType,
    pub message: String,
}

impl AlexaError {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }

    pub fn invalid_directive(message: impl Into<String>) -> Self {
        Self::new(ErrorType::InvalidDirective, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorType::InternalError, message)
    }

    pub fn accept_grant_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorType::AcceptGrantFailed, message)
    }

    pub fn namespace(&self) -> &'static str {
        self.error_type.namespace()
    }
}

/// Failures while turning a request body into a [`crate::Directive`].
#[derive(Error, Debug)]
pub enum DirectiveParseError {
    #[error("failed to unmarshal request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request does not contain a valid alexa directive")]
    MissingDirective,

    #[error("directive does not contain a header")]
    MissingHeader,

    #[error("{0} is not a JSON object")]
    NotAnObject(&'static str),
}

pub type Result<T> = std::result::Result<T, DirectiveParseError>;
