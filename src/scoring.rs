//! Scoring adapter: model parameters in, date-indexed series out.

use log::info;

use crate::error::{DashboardError, Result};
use crate::models::{ScoringRequest, ScoringResponse};
use crate::series::TimeSeries;
use crate::transport::Transport;

/// Calls the scoring endpoint over a [`Transport`].
pub struct ScoringAdapter<T: Transport> {
    transport: T,
    scoring_url: String,
}

impl<T: Transport> ScoringAdapter<T> {
    pub fn new(transport: T, scoring_url: impl Into<String>) -> Self {
        Self {
            transport,
            scoring_url: scoring_url.into(),
        }
    }

    pub fn scoring_url(&self) -> &str {
        &self.scoring_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Score one request and index the result by date.
    ///
    /// Anything other than HTTP 200 fails with [`DashboardError::Scoring`]
    /// carrying the status and raw body. A single attempt is made.
    pub fn score(&self, token: &str, request: &ScoringRequest) -> Result<TimeSeries> {
        let payload = serde_json::to_value(request.to_payload())?;
        info!("Scoring with payload: {}", payload);

        let resp = self
            .transport
            .post_json(&self.scoring_url, Some(token), &payload)?;
        if resp.status != 200 {
            return Err(DashboardError::Scoring {
                status: resp.status,
                body: resp.body,
            });
        }

        let response = ScoringResponse::from_json(&resp.body)?;
        info!(
            "{} returned {} rows of {:?}",
            request.algorithm,
            response.len(),
            response.fields
        );
        TimeSeries::new(request.start_date, response)
    }
}
