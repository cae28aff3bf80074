//! Epidemic forecast dashboard client.
//!
//! Requests SIR, logistic and calibration forecasts from a hosted
//! model-scoring endpoint, indexes the tabular reply by date, and renders it
//! as an interactive Plotly chart.
//!
//! # Quick start
//!
//! ```no_run
//! use epiforecast_dashboard::{Dashboard, DashboardConfig};
//!
//! let config = DashboardConfig::from_env().unwrap();
//! let dashboard = Dashboard::builder().config(config).build().unwrap();
//!
//! // Token exchange, calibration scoring and chart, in one call
//! let html = dashboard.render().unwrap();
//! ```

pub mod auth;
#[cfg(feature = "async")]
pub mod async_client;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod series;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboard;
pub use auth::TokenProvider;
pub use config::{DashboardConfig, TransportKind};
pub use error::{DashboardError, Result};
pub use models::{Algorithm, ScoringRequest, ScoringResponse};
pub use scoring::ScoringAdapter;
pub use series::TimeSeries;
pub use transport::{HttpTransport, RawResponse, Transport};

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use log::info;
use serde_json::Value;

// ---------------------------------------------------------------------------
// DashboardParams
// ---------------------------------------------------------------------------

/// Model inputs shared by the charts of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub start_date: NaiveDate,
    pub country: String,
    pub predict_range: u32,
    pub s0: u64,
    pub i0: u64,
    pub r0: u64,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 22).unwrap_or_default(),
            country: "Poland".to_string(),
            predict_range: 40,
            s0: 10_000,
            i0: 20,
            r0: 10,
        }
    }
}

impl DashboardParams {
    /// Scoring request for `algorithm` with these inputs.
    pub fn request(&self, algorithm: Algorithm) -> ScoringRequest {
        ScoringRequest::new(
            algorithm,
            self.start_date,
            self.country.clone(),
            self.predict_range,
            self.s0,
            self.i0,
            self.r0,
        )
    }
}

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain one. A configuration is required;
/// everything else has defaults.
#[derive(Default)]
pub struct DashboardBuilder {
    config: Option<DashboardConfig>,
    params: Option<DashboardParams>,
    timeout: Option<Duration>,
}

impl DashboardBuilder {
    /// Set the resolved configuration (credentials, endpoints, transport).
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the model inputs used by [`Dashboard::render()`].
    pub fn params(mut self, params: DashboardParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the HTTP timeout. Defaults to the HTTP client's own default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a dashboard talking to the real services over HTTP.
    pub fn build(self) -> Result<Dashboard<HttpTransport>> {
        let timeout = self
            .timeout
            .or_else(|| self.config.as_ref().and_then(|c| c.timeout));
        let transport = HttpTransport::new(timeout)?;
        self.build_with_transport(transport)
    }

    /// Build a dashboard over a caller-supplied transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<Dashboard<T>> {
        let config = self
            .config
            .ok_or_else(|| DashboardError::Config("no configuration supplied".into()))?;
        let tokens = TokenProvider::from_config(&config);
        let adapter = ScoringAdapter::new(transport, config.scoring_url.clone());
        Ok(Dashboard {
            config,
            params: self.params.unwrap_or_default(),
            tokens,
            adapter,
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Token provider and scoring adapter wired together for the render path.
///
/// Holds no mutable state: every render fetches a fresh token and scores
/// from scratch, so concurrent renders never interact.
pub struct Dashboard<T: Transport = HttpTransport> {
    config: DashboardConfig,
    params: DashboardParams,
    tokens: TokenProvider,
    adapter: ScoringAdapter<T>,
}

impl Dashboard<HttpTransport> {
    /// Create a new builder.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Build an HTTP dashboard straight from a configuration.
    pub fn from_config(config: DashboardConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }
}

impl<T: Transport> Dashboard<T> {
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn params(&self) -> &DashboardParams {
        &self.params
    }

    pub fn adapter(&self) -> &ScoringAdapter<T> {
        &self.adapter
    }

    /// Obtain a bearer token from the configured provider.
    pub fn token(&self) -> Result<String> {
        self.tokens.token(self.adapter.transport())
    }

    /// Score a request with an already obtained token.
    pub fn score(&self, token: &str, request: &ScoringRequest) -> Result<TimeSeries> {
        self.adapter.score(token, request)
    }

    /// Fetch a calibration forecast with its daily change columns.
    pub fn calibration(&self, params: &DashboardParams) -> Result<TimeSeries> {
        let token = self.token()?;
        self.score(&token, &params.request(Algorithm::Calibration))?
            .with_calibration_changes()
    }

    /// SIR against logistic infected-count figure; one token, two scoring calls.
    pub fn infected_comparison(&self, params: &DashboardParams) -> Result<Value> {
        let token = self.token()?;
        let sir = self.score(&token, &params.request(Algorithm::Sir))?;
        let logistic = self.score(&token, &params.request(Algorithm::Logistic))?;
        chart::infected_figure(&sir, &logistic, &params.country)
    }

    /// Render the dashboard page with the configured inputs.
    pub fn render(&self) -> Result<String> {
        self.render_with(&self.params)
    }

    /// Render the calibration dashboard page for `params`.
    ///
    /// Any failure along the way aborts the render; no partial page is produced.
    pub fn render_with(&self, params: &DashboardParams) -> Result<String> {
        let series = self.calibration(params)?;
        info!(
            "Rendering {} days for {} ({} .. {:?})",
            series.len(),
            params.country,
            series.start_date(),
            series.last_date()
        );
        let figure = chart::calibration_figure(&series, &params.country)?;
        chart::render_html("COVID-19 Predictions with Watson Machine Learning", &figure)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<T: Transport> fmt::Display for Dashboard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard(scoring_url={}, transport={}, country={}, predict_range={})",
            self.config.scoring_url,
            self.config.transport,
            self.params.country,
            self.params.predict_range
        )
    }
}
