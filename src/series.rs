//! Date-indexed table built from a scoring response.
//!
//! Row `k` of a [`TimeSeries`] belongs to `start_date + k` days. The index is
//! derived, never stored, so it always has exactly one date per row.

use chrono::{Days, NaiveDate};
use serde_json::{Map, Value};

use crate::error::{DashboardError, Result};
use crate::models::ScoringResponse;

/// Label layout for the chart x-axis: day/month/two-digit year.
pub const LABEL_DATE_FORMAT: &str = "%d/%m/%y";

pub const ACTUAL: &str = "Actual";
pub const PREDICTED: &str = "Predicted";
pub const ACTUAL_CHANGE: &str = "ActualChange";
pub const PREDICTED_CHANGE: &str = "PredictedChange";
pub const INFECTED: &str = "I";

/// Day-over-day differences, with zero assumed before the first day.
///
/// `[5, 9, 20]` becomes `[5, 4, 11]`.
pub fn daily_change(values: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    values
        .iter()
        .map(|&v| {
            let delta = v - prev;
            prev = v;
            delta
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    start_date: NaiveDate,
    fields: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TimeSeries {
    /// Index a response by date. Every row must be as wide as the field list.
    pub fn new(start_date: NaiveDate, response: ScoringResponse) -> Result<Self> {
        let width = response.fields.len();
        if let Some((k, row)) = response
            .values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(DashboardError::MalformedResponse(format!(
                "Row {} has {} values for {} fields",
                k,
                row.len(),
                width
            )));
        }
        Ok(Self {
            start_date,
            fields: response.fields,
            rows: response.values,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Date of row `k`.
    pub fn date_at(&self, k: usize) -> Option<NaiveDate> {
        if k >= self.rows.len() {
            return None;
        }
        self.start_date.checked_add_days(Days::new(k as u64))
    }

    /// One date per row, starting at the start date.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.rows.len()).filter_map(|k| self.date_at(k)).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.len().checked_sub(1).and_then(|k| self.date_at(k))
    }

    /// X-axis labels, e.g. `22/01/20`.
    pub fn labels(&self) -> Vec<String> {
        self.dates()
            .iter()
            .map(|d| d.format(LABEL_DATE_FORMAT).to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Numeric values of a column.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self
            .fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| {
                DashboardError::MalformedResponse(format!("Missing column '{}'", name))
            })?;

        self.rows
            .iter()
            .enumerate()
            .map(|(k, row)| {
                row.get(idx).and_then(|v| v.as_f64()).ok_or_else(|| {
                    DashboardError::MalformedResponse(format!(
                        "Column '{}' row {} is not numeric",
                        name, k
                    ))
                })
            })
            .collect()
    }

    /// Append a column, or overwrite it if the name already exists.
    pub fn push_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(DashboardError::InvalidArgument(format!(
                "Column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        match self.fields.iter().position(|f| f == name) {
            Some(idx) => {
                for (k, (row, v)) in self.rows.iter_mut().zip(values).enumerate() {
                    let cell = row.get_mut(idx).ok_or_else(|| {
                        DashboardError::MalformedResponse(format!(
                            "Row {} has no '{}' value",
                            k, name
                        ))
                    })?;
                    *cell = Value::from(v);
                }
            }
            None => {
                self.fields.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(Value::from(v));
                }
            }
        }
        Ok(())
    }

    /// Add `target` as the day-over-day change of `source`.
    pub fn with_daily_change(mut self, source: &str, target: &str) -> Result<Self> {
        let change = daily_change(&self.column(source)?);
        self.push_column(target, change)?;
        Ok(self)
    }

    /// Add `ActualChange` and `PredictedChange` to a calibration result.
    pub fn with_calibration_changes(self) -> Result<Self> {
        self.with_daily_change(ACTUAL, ACTUAL_CHANGE)?
            .with_daily_change(PREDICTED, PREDICTED_CHANGE)
    }

    /// Rows as JSON objects, each carrying its `date` label.
    pub fn to_records(&self) -> Vec<Value> {
        self.labels()
            .into_iter()
            .zip(&self.rows)
            .map(|(label, row)| {
                let mut record = Map::new();
                record.insert("date".to_string(), Value::String(label));
                for (field, value) in self.fields.iter().zip(row) {
                    record.insert(field.clone(), value.clone());
                }
                Value::Object(record)
            })
            .collect()
    }
}
