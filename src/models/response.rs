use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// TokenResponse — Identity endpoint reply
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

// ---------------------------------------------------------------------------
// ScoringResponse — Tabular result returned by the scoring service
// ---------------------------------------------------------------------------

/// Ordered rows of algorithm-dependent fields (e.g. `I`, `Actual`, `Predicted`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub fields: Vec<String>,
    pub values: Vec<Vec<Value>>,
}

impl ScoringResponse {
    /// Parse a response body.
    ///
    /// Accepts the flat `{fields, values}` shape as well as the
    /// `{predictions: [{fields, values}, ...]}` envelope, in which case the
    /// first prediction is used. Every row must be as wide as the field list.
    pub fn from_json(body: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(body).map_err(|e| {
            DashboardError::MalformedResponse(format!("Scoring response is not JSON: {}", e))
        })?;

        let table = match data.get("predictions").and_then(|p| p.as_array()) {
            Some(predictions) => predictions.first().ok_or_else(|| {
                DashboardError::MalformedResponse("Scoring response has no predictions".into())
            })?,
            None => &data,
        };

        let fields = table
            .get("fields")
            .and_then(|f| f.as_array())
            .ok_or_else(|| {
                DashboardError::MalformedResponse("Scoring response is missing 'fields'".into())
            })?
            .iter()
            .map(|f| {
                f.as_str().map(|s| s.to_string()).ok_or_else(|| {
                    DashboardError::MalformedResponse(format!("Field name {} is not a string", f))
                })
            })
            .collect::<Result<Vec<String>>>()?;

        let values = table
            .get("values")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                DashboardError::MalformedResponse("Scoring response is missing 'values'".into())
            })?
            .iter()
            .enumerate()
            .map(|(i, row)| match row.as_array() {
                Some(cells) if cells.len() == fields.len() => Ok(cells.clone()),
                Some(cells) => Err(DashboardError::MalformedResponse(format!(
                    "Row {} has {} values for {} fields",
                    i,
                    cells.len(),
                    fields.len()
                ))),
                None => Err(DashboardError::MalformedResponse(format!(
                    "Row {} is not an array",
                    i
                ))),
            })
            .collect::<Result<Vec<Vec<Value>>>>()?;

        Ok(Self { fields, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
