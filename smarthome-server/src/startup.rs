// Wires the configured collaborators into the dispatcher and HTTP state

use crate::config::ServerConfig;
use crate::http::{AppState, BasicAuth};
use crate::simulated::SimulatedDeviceFactory;
use crate::validator::SchemaValidator;
use smarthome_api::directives::EndpointsError;
use smarthome_api::{Authorization, AuthorizationEndpoints, Discovery, Dispatcher, RestrictedAuthority};
use smarthome_core::SystemClock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, info_span, warn};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load discovery endpoints: {0}")]
    Endpoints(#[from] EndpointsError),
}

pub fn build_dispatcher(config: &ServerConfig) -> Result<Dispatcher, StartupError> {
    let auth = &config.authorization;
    let authority = RestrictedAuthority::new(auth.client_id.clone(), auth.client_secret.clone())
        .with_restricted_users(auth.restricted_users.clone());

    let authorization = Authorization::new(Some(Arc::new(authority))).with_endpoints(AuthorizationEndpoints {
        token_url: auth.token_url.clone(),
        profile_url: auth.profile_url.clone(),
    });

    let discovery = match &config.discovery.endpoints_file {
        Some(path) => {
            let discovery = Discovery::from_file(path)?;
            info!(
                "Loaded {} discoverable endpoints from {}",
                discovery.endpoint_count().unwrap_or_default(),
                path.display()
            );
            discovery
        }
        None => {
            warn!("No endpoints file configured, discovery directives will fail");
            Discovery::unconfigured()
        }
    };

    let dispatcher = Dispatcher::with_default_processors(authorization, discovery, Arc::new(SystemClock))
        .with_device_factory(Arc::new(SimulatedDeviceFactory::new()))
        .with_span(info_span!("smarthome"));

    Ok(dispatcher)
}

pub fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let mut state = AppState::new(Arc::new(build_dispatcher(config)?));

    if config.basic_auth.is_enabled() {
        state = state.with_basic_auth(BasicAuth::new(
            config.basic_auth.username.clone(),
            config.basic_auth.password.clone(),
        ));
    }

    if config.validation.enabled {
        info!("Responses are validated against {}", config.validation.schema);
        state = state.with_validator(Arc::new(SchemaValidator::new(config.validation.schema.clone())));
    }

    Ok(state)
}
