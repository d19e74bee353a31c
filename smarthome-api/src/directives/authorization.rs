// AcceptGrant handling: resolves the grantee, exchanges the authorization
// code for access tokens and lets the authority decide.

use crate::authority::{AccessTokens, Authority};
use crate::error::{DirectiveError, Result};
use crate::processor::DirectiveProcessor;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use smarthome_core::{AlexaError, Device, Directive, Header, Response};
use std::sync::Arc;
use tracing::debug;

pub const AUTHORIZATION: &str = "Alexa.Authorization";

pub const TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";
pub const PROFILE_URL: &str = "https://api.amazon.com/user/profile";

/// Vendor endpoints used during the grant exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationEndpoints {
    pub token_url: String,
    pub profile_url: String,
}

impl Default for AuthorizationEndpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            profile_url: PROFILE_URL.to_string(),
        }
    }
}

/// Checks the grantee and requests the access tokens (along with renewal
/// information) needed for asynchronous responses.
pub struct Authorization {
    authority: Option<Arc<dyn Authority>>,
    endpoints: AuthorizationEndpoints,
    client: reqwest::Client,
}

impl Authorization {
    pub fn new(authority: Option<Arc<dyn Authority>>) -> Self {
        Self {
            authority,
            endpoints: AuthorizationEndpoints::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: AuthorizationEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn fetch_grantee_profile(&self, grantee_token: &str) -> Result<Map<String, Value>> {
        let profile = self
            .client
            .get(&self.endpoints.profile_url)
            .bearer_auth(grantee_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(profile)
    }

    async fn fetch_access_tokens(&self, authority: &dyn Authority, code: &str) -> Result<AccessTokens> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", authority.client_id()),
            ("client_secret", authority.client_secret()),
        ];

        let tokens = self
            .client
            .post(&self.endpoints.token_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(tokens)
    }
}

#[async_trait]
impl DirectiveProcessor for Authorization {
    fn name(&self) -> &'static str {
        "authorization"
    }

    fn is_capable(&self, directive: &Directive) -> bool {
        directive.header.namespace == AUTHORIZATION
    }

    async fn process(&self, directive: &Directive, _device: Option<&dyn Device>) -> Result<Response> {
        if !self.is_capable(directive) {
            return Err(DirectiveError::IncompatibleDirective);
        }

        let authority = self
            .authority
            .as_deref()
            .ok_or(DirectiveError::AuthorityMissing)?;

        let grantee_token = directive
            .payload_str("grantee", "token")
            .ok_or_else(|| AlexaError::invalid_directive("payload does not contain a grantee token"))?;
        let code = directive
            .payload_str("grant", "code")
            .ok_or_else(|| AlexaError::invalid_directive("payload does not contain a grant code"))?;

        let (profile, tokens) = tokio::try_join!(
            self.fetch_grantee_profile(grantee_token),
            self.fetch_access_tokens(authority, code),
        )?;

        let email = profile
            .get("email")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DirectiveError::UnexpectedResponse("grantee profile does not contain an email".to_string())
            })?;

        debug!("Accepting grant for {}", email);
        authority
            .accept_grant(email, grantee_token, &tokens)
            .await
            .map_err(|err| AlexaError::accept_grant_failed(err.to_string()))?;

        Ok(Response::new(Header::new(AUTHORIZATION, "AcceptGrant.Response")).with_payload(json!({})))
    }
}
