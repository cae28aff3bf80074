//! Endpoint constants and environment-driven dashboard configuration.
//!
//! Everything the dashboard needs from its surroundings is resolved once into a
//! [`DashboardConfig`] and handed to constructors explicitly.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::{DashboardError, Result};

pub const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";
pub const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Field names of the single-row scoring payload, in value order.
pub const PAYLOAD_FIELDS: [&str; 7] = [
    "algorithm",
    "start_date",
    "country",
    "predict_range",
    "S0",
    "I0",
    "R0",
];

pub const ENV_API_KEY: &str = "WML_API_KEY";
pub const ENV_SCORING_URL: &str = "WML_SCORING_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "CF_INSTANCE_INTERNAL_IP";
pub const ENV_CF_GUID: &str = "CF_INSTANCE_GUID";
pub const ENV_TRANSPORT: &str = "WML_TRANSPORT";

// ---------------------------------------------------------------------------
// TransportKind
// ---------------------------------------------------------------------------

/// How the scoring service is reached.
///
/// `Direct` exchanges the API key for a bearer token on every render.
/// `Provided` treats the configured key as an already-issued bearer token,
/// the way a pre-authenticated vendor client would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    #[default]
    Direct,
    Provided,
}

impl FromStr for TransportKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "direct" | "http" => Ok(TransportKind::Direct),
            "provided" | "client" => Ok(TransportKind::Provided),
            other => Err(DashboardError::Config(format!(
                "Unknown transport '{}' (expected 'direct' or 'provided')",
                other
            ))),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Direct => f.write_str("direct"),
            TransportKind::Provided => f.write_str("provided"),
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Resolved dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_key: String,
    pub scoring_url: String,
    pub token_url: String,
    pub host: String,
    pub port: u16,
    /// Running on a Cloud Foundry instance (`CF_INSTANCE_GUID` set).
    pub cf_instance: bool,
    pub transport: TransportKind,
    /// HTTP timeout. `None` keeps the client's default.
    pub timeout: Option<Duration>,
}

impl DashboardConfig {
    /// Create a configuration for the given credentials with local defaults.
    pub fn new(api_key: impl Into<String>, scoring_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            scoring_url: scoring_url.into(),
            token_url: IAM_TOKEN_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cf_instance: false,
            transport: TransportKind::Direct,
            timeout: None,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// `WML_API_KEY` and `WML_SCORING_URL` are required; everything else
    /// falls back to local defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DashboardError::Config(format!("{} is not set", name)))
        };

        let api_key = required(ENV_API_KEY)?;
        let scoring_url = required(ENV_SCORING_URL)?;
        Url::parse(&scoring_url).map_err(|e| {
            DashboardError::Config(format!("{} is not a valid URL: {}", ENV_SCORING_URL, e))
        })?;

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                DashboardError::Config(format!("{} must be a port number, got '{}'", ENV_PORT, raw))
            })?,
            None => DEFAULT_PORT,
        };
        let host = lookup(ENV_HOST)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let cf_instance = lookup(ENV_CF_GUID).is_some_and(|g| !g.is_empty());
        let transport = match lookup(ENV_TRANSPORT) {
            Some(raw) => raw.parse()?,
            None => TransportKind::Direct,
        };

        Ok(Self {
            api_key,
            scoring_url,
            token_url: IAM_TOKEN_URL.to_string(),
            host,
            port,
            cf_instance,
            transport,
            timeout: None,
        })
    }

    /// Debug mode is on everywhere except on a cloud instance.
    pub fn debug(&self) -> bool {
        !self.cf_instance
    }

    /// Scoring URL with its path stripped, e.g. `https://us-south.ml.cloud.ibm.com`.
    pub fn base_url(&self) -> Result<String> {
        let mut url = self.parsed_scoring_url()?;
        url.set_path("");
        url.set_query(None);
        url.set_fragment(None);
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// Service instance id: the fourth `/`-separated segment of the scoring path.
    ///
    /// For `/v3/wml_instances/<id>/deployments/...` this is `<id>`.
    pub fn instance_id(&self) -> Result<String> {
        let url = self.parsed_scoring_url()?;
        url.path()
            .split('/')
            .nth(3)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                DashboardError::Config(format!(
                    "Scoring URL path '{}' has no instance id segment",
                    url.path()
                ))
            })
    }

    fn parsed_scoring_url(&self) -> Result<Url> {
        Url::parse(&self.scoring_url)
            .map_err(|e| DashboardError::Config(format!("Invalid scoring URL: {}", e)))
    }
}
