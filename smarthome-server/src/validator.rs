// Response validation against the smart-home message JSON schema

use async_trait::async_trait;
use jsonschema::JSONSchema;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("could not read schema: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not fetch schema: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not compile schema: {0}")]
    Schema(String),

    #[error("{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Checks serialized responses before they leave the server.
#[async_trait]
pub trait ResponseValidator: Send + Sync {
    /// File path or URL the schema was taken from, for log output.
    fn schema_reference(&self) -> &str;

    async fn validate(&self, response: &[u8]) -> Result<(), ValidationError>;
}

/// Validator loading its schema on first use, from a file or an http(s)
/// URL.
pub struct SchemaValidator {
    reference: String,
    client: reqwest::Client,
    schema: OnceCell<JSONSchema>,
}

impl SchemaValidator {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            client: reqwest::Client::new(),
            schema: OnceCell::new(),
        }
    }

    async fn load(&self) -> Result<JSONSchema, ValidationError> {
        debug!("Loading response schema from {}", self.reference);

        let raw: Value = if self.reference.starts_with("http://") || self.reference.starts_with("https://") {
            self.client
                .get(&self.reference)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?
        } else {
            let bytes = tokio::fs::read(&self.reference).await?;
            serde_json::from_slice(&bytes)?
        };

        JSONSchema::compile(&raw).map_err(|err| ValidationError::Schema(err.to_string()))
    }
}

#[async_trait]
impl ResponseValidator for SchemaValidator {
    fn schema_reference(&self) -> &str {
        &self.reference
    }

    async fn validate(&self, response: &[u8]) -> Result<(), ValidationError> {
        let schema = self.schema.get_or_try_init(|| self.load()).await?;
        let instance: Value = serde_json::from_slice(response)?;

        if let Err(errors) = schema.validate(&instance) {
            let messages = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect();
            return Err(ValidationError::Invalid(messages));
        }

        Ok(())
    }
}
