// Authorities deciding which Alexa users get access to the skill

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Tokens returned by the vendor token endpoint (`access_token`,
/// `refresh_token`, `expires_in`, ...).
pub type AccessTokens = Map<String, Value>;

/// The instance where an Alexa user gets access granted.
#[async_trait]
pub trait Authority: Send + Sync {
    /// OAuth client id of the skill.
    fn client_id(&self) -> &str;

    /// OAuth client secret of the skill. Never logged.
    fn client_secret(&self) -> &str;

    /// Grants access to `email` and takes over the tokens needed for
    /// asynchronous responses. An error rejects the grant.
    async fn accept_grant(
        &self,
        email: &str,
        bearer_token: &str,
        tokens: &AccessTokens,
    ) -> anyhow::Result<()>;
}

/// Authority granting access to everyone, or only to a fixed list of
/// e-mail addresses when one is given.
#[derive(Debug, Clone, Default)]
pub struct RestrictedAuthority {
    client_id: String,
    client_secret: String,
    restricted_users: Vec<String>,
}

impl RestrictedAuthority {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            restricted_users: Vec::new(),
        }
    }

    pub fn with_restricted_users(mut self, users: Vec<String>) -> Self {
        self.restricted_users = users;
        self
    }

    pub fn is_granted(&self, email: &str) -> bool {
        self.restricted_users.is_empty() || self.restricted_users.iter().any(|user| user == email)
    }
}

#[async_trait]
impl Authority for RestrictedAuthority {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }

    async fn accept_grant(
        &self,
        email: &str,
        _bearer_token: &str,
        _tokens: &AccessTokens,
    ) -> anyhow::Result<()> {
        if !self.is_granted(email) {
            warn!("Rejected grant for {}", email);
            anyhow::bail!("Restricted users only");
        }

        // TODO: keep the tokens to send proactive state reports once those are supported
        info!("Granted access to {}", email);
        Ok(())
    }
}
