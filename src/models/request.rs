use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::PAYLOAD_FIELDS;
use crate::error::DashboardError;

/// Date layout expected by the scoring service: month/day/two-digit year, no padding.
pub const PAYLOAD_DATE_FORMAT: &str = "%-m/%-d/%y";

// ---------------------------------------------------------------------------
// Algorithm — Forecasting algorithm exposed by the scoring service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Sir,
    Logistic,
    Calibration,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Sir, Algorithm::Logistic, Algorithm::Calibration];

    /// Wire name sent in the payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sir => "SIR",
            Algorithm::Logistic => "LOGISTIC",
            Algorithm::Calibration => "CALIBRATION",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::InvalidArgument(format!("Unknown algorithm: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// ScoringRequest — Model parameters for one scoring call
// ---------------------------------------------------------------------------

/// Inputs for a single scoring call.
///
/// `predict_range` and `country` are passed through untouched; the remote
/// service is the authority on which values it accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRequest {
    pub algorithm: Algorithm,
    pub start_date: NaiveDate,
    pub country: String,
    pub predict_range: u32,
    pub s0: u64,
    pub i0: u64,
    pub r0: u64,
}

impl ScoringRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        algorithm: Algorithm,
        start_date: NaiveDate,
        country: impl Into<String>,
        predict_range: u32,
        s0: u64,
        i0: u64,
        r0: u64,
    ) -> Self {
        Self {
            algorithm,
            start_date,
            country: country.into(),
            predict_range,
            s0,
            i0,
            r0,
        }
    }

    /// The start date as the service expects it, e.g. `1/22/20`.
    pub fn payload_date(&self) -> String {
        self.start_date.format(PAYLOAD_DATE_FORMAT).to_string()
    }

    /// Build the `{fields, values}` body for this request.
    pub fn to_payload(&self) -> ScoringPayload {
        ScoringPayload {
            fields: PAYLOAD_FIELDS.iter().map(|f| f.to_string()).collect(),
            values: vec![vec![
                json!(self.algorithm.as_str()),
                json!(self.payload_date()),
                json!(self.country),
                json!(self.predict_range),
                json!(self.s0),
                json!(self.i0),
                json!(self.r0),
            ]],
        }
    }
}

// ---------------------------------------------------------------------------
// ScoringPayload — Body posted to the scoring endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPayload {
    pub fields: Vec<String>,
    pub values: Vec<Vec<Value>>,
}
