//! Client configuration: bearer token plus target endpoint.

use std::fmt;

use crate::error::ApiError;

/// Production add-node endpoint used unless overridden.
pub const DEFAULT_ENDPOINT: &str = "https://europe-west1-tagr-prod.cloudfunctions.net/addToNodeV2";

pub const TOKEN_ENV: &str = "TANA_API_TOKEN";
pub const ENDPOINT_ENV: &str = "TANA_API_ENDPOINT";

/// Immutable settings shared by every request a client makes.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    token: String,
    endpoint: String,
}

impl ClientConfig {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint. An empty `endpoint` keeps the current one.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        if !endpoint.is_empty() {
            self.endpoint = endpoint.to_string();
        }
        self
    }

    /// Read `TANA_API_TOKEN` and the optional `TANA_API_ENDPOINT`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Config(format!("{TOKEN_ENV} is not set")))?;
        let endpoint = lookup(ENDPOINT_ENV).unwrap_or_default();
        Ok(Self::new(&token).with_endpoint(&endpoint))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
