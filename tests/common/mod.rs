//! Shared test fixtures: a recording stub transport and canned service replies.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use epiforecast_dashboard::{DashboardConfig, DashboardError, RawResponse, Transport};
use serde_json::{json, Value};

pub const TOKEN_URL: &str = "https://iam.test/identity/token";
pub const SCORING_URL: &str =
    "https://scoring.test/v3/wml_instances/inst-42/deployments/dep-1/online";

/// One recorded outbound call.
#[derive(Debug, Clone)]
pub enum Call {
    Form {
        url: String,
        fields: Vec<(String, String)>,
    },
    Json {
        url: String,
        bearer: Option<String>,
        body: Value,
    },
}

/// Transport that replays queued responses and records every call.
///
/// Form posts are answered from the token queue, JSON posts from the
/// scoring queue. An empty queue fails the call.
#[derive(Default)]
pub struct StubTransport {
    token_replies: RefCell<VecDeque<RawResponse>>,
    scoring_replies: RefCell<VecDeque<RawResponse>>,
    pub calls: RefCell<Vec<Call>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_reply(self, status: u16, body: impl Into<String>) -> Self {
        self.token_replies
            .borrow_mut()
            .push_back(RawResponse::new(status, body));
        self
    }

    pub fn scoring_reply(self, status: u16, body: impl Into<String>) -> Self {
        self.scoring_replies
            .borrow_mut()
            .push_back(RawResponse::new(status, body));
        self
    }

    pub fn form_calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Form { url, fields } => Some((url.clone(), fields.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn json_calls(&self) -> Vec<(String, Option<String>, Value)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Json { url, bearer, body } => {
                    Some((url.clone(), bearer.clone(), body.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

impl Transport for StubTransport {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> epiforecast_dashboard::Result<RawResponse> {
        self.calls.borrow_mut().push(Call::Form {
            url: url.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        self.token_replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| DashboardError::InvalidArgument("no token reply queued".into()))
    }

    fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> epiforecast_dashboard::Result<RawResponse> {
        self.calls.borrow_mut().push(Call::Json {
            url: url.to_string(),
            bearer: bearer.map(|b| b.to_string()),
            body: body.clone(),
        });
        self.scoring_replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| DashboardError::InvalidArgument("no scoring reply queued".into()))
    }
}

pub fn test_config() -> DashboardConfig {
    let mut cfg = DashboardConfig::new("test-api-key", SCORING_URL);
    cfg.token_url = TOKEN_URL.to_string();
    cfg
}

pub fn token_body(token: &str) -> String {
    json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": 3600
    })
    .to_string()
}

/// Calibration reply with `n` rows where Actual grows by 10 and Predicted by 12 per day.
pub fn calibration_body(n: usize) -> String {
    let values: Vec<Value> = (0..n)
        .map(|k| json!([10 * (k + 1), 12 * (k + 1)]))
        .collect();
    json!({ "fields": ["Actual", "Predicted"], "values": values }).to_string()
}

/// SIR/logistic style reply with `n` rows of S, I, R.
pub fn sir_body(n: usize) -> String {
    let values: Vec<Value> = (0..n)
        .map(|k| json!([10_000 - k, 20 + k, 10 + k]))
        .collect();
    json!({ "fields": ["S", "I", "R"], "values": values }).to_string()
}
