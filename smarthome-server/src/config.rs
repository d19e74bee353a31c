// Server configuration: TOML file, environment overlay, validation

use serde::{Deserialize, Serialize};
use smarthome_api::directives::authorization::{PROFILE_URL, TOKEN_URL};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Published smart-home message schema, used when validation is enabled
/// without an explicit schema reference.
pub const DEFAULT_SCHEMA: &str = "https://raw.githubusercontent.com/alexa/alexa-smarthome/master/validation_schemas/alexa_smart_home_message_schema.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub basic_auth: BasicAuthConfig,
    pub authorization: AuthorizationConfig,
    pub discovery: DiscoveryConfig,
    pub validation: ValidationConfig,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ListenConfig::default(),
            basic_auth: BasicAuthConfig::default(),
            authorization: AuthorizationConfig::default(),
            discovery: DiscoveryConfig::default(),
            validation: ValidationConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8181,
        }
    }
}

/// Credentials expected on every request. An empty username disables the
/// check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl BasicAuthConfig {
    pub fn is_enabled(&self) -> bool {
        !self.username.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    pub client_id: String,
    pub client_secret: String,
    /// E-mail addresses allowed to link their account; empty allows all.
    pub restricted_users: Vec<String>,
    pub token_url: String,
    pub profile_url: String,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            restricted_users: Vec::new(),
            token_url: TOKEN_URL.to_string(),
            profile_url: PROFILE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub endpoints_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub enabled: bool,
    /// File path or http(s) URL of the JSON schema.
    pub schema: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay `SMARTHOME_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var("SMARTHOME_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }

        if let Some(address) = var("SMARTHOME_BIND_ADDRESS") {
            self.server.bind_address = address;
        }

        if let Some(username) = var("SMARTHOME_BASIC_AUTH_USERNAME") {
            self.basic_auth.username = username;
        }

        if let Some(password) = var("SMARTHOME_BASIC_AUTH_PASSWORD") {
            self.basic_auth.password = password;
        }

        if let Some(client_id) = var("SMARTHOME_CLIENT_ID") {
            self.authorization.client_id = client_id;
        }

        if let Some(client_secret) = var("SMARTHOME_CLIENT_SECRET") {
            self.authorization.client_secret = client_secret;
        }

        if let Some(file) = var("SMARTHOME_ENDPOINTS_FILE") {
            self.discovery.endpoints_file = Some(PathBuf::from(file));
        }

        if let Some(level) = var("SMARTHOME_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".to_string()));
        }

        if self.basic_auth.is_enabled() && self.basic_auth.password.is_empty() {
            return Err(ConfigError::Validation(
                "basic_auth.password is required when basic_auth.username is set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}
