//! Bearer-token acquisition for the scoring service.

use log::debug;

use crate::config::{self, DashboardConfig, TransportKind};
use crate::error::{DashboardError, Result};
use crate::models::TokenResponse;
use crate::transport::Transport;

/// Source of the bearer token sent with scoring calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProvider {
    /// Exchange an API key at the identity endpoint on every call.
    ApiKey { api_key: String, token_url: String },
    /// Reuse a token the caller already holds; no network call.
    PreAuthenticated(String),
}

impl TokenProvider {
    /// API-key exchange against the default identity endpoint.
    pub fn api_key(api_key: impl Into<String>) -> Self {
        TokenProvider::ApiKey {
            api_key: api_key.into(),
            token_url: config::IAM_TOKEN_URL.to_string(),
        }
    }

    /// Select the provider matching the configured transport.
    pub fn from_config(cfg: &DashboardConfig) -> Self {
        match cfg.transport {
            TransportKind::Direct => TokenProvider::ApiKey {
                api_key: cfg.api_key.clone(),
                token_url: cfg.token_url.clone(),
            },
            TransportKind::Provided => TokenProvider::PreAuthenticated(cfg.api_key.clone()),
        }
    }

    /// Obtain a bearer token.
    ///
    /// Any non-success status or a body without `access_token` fails with
    /// [`DashboardError::Authentication`]. There is no caching: every call
    /// on an `ApiKey` provider performs one exchange.
    pub fn token<T: Transport>(&self, transport: &T) -> Result<String> {
        match self {
            TokenProvider::PreAuthenticated(token) => {
                if token.is_empty() {
                    return Err(DashboardError::InvalidArgument(
                        "Pre-authenticated token is empty".into(),
                    ));
                }
                Ok(token.clone())
            }
            TokenProvider::ApiKey { api_key, token_url } => {
                if api_key.is_empty() {
                    return Err(DashboardError::InvalidArgument("API key is empty".into()));
                }
                debug!("Requesting bearer token from {}", token_url);
                let resp = transport.post_form(
                    token_url,
                    &[("grant_type", config::APIKEY_GRANT_TYPE), ("apikey", api_key.as_str())],
                )?;
                if !resp.is_success() {
                    return Err(DashboardError::Authentication(format!(
                        "token endpoint returned {}: {}",
                        resp.status, resp.body
                    )));
                }
                let parsed: TokenResponse = serde_json::from_str(&resp.body).map_err(|e| {
                    DashboardError::Authentication(format!("unreadable token response: {}", e))
                })?;
                if parsed.access_token.is_empty() {
                    return Err(DashboardError::Authentication(
                        "token response has an empty access_token".into(),
                    ));
                }
                debug!("Obtained bearer token (expires in {:?}s)", parsed.expires_in);
                Ok(parsed.access_token)
            }
        }
    }
}
