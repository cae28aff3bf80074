//! HTTP transport used by the token provider and the scoring adapter.
//!
//! The [`Transport`] trait is the seam between request building and the wire:
//! [`HttpTransport`] talks to the real services through a blocking `reqwest`
//! client, and tests plug in a recording stub.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::error::Result;

/// Status code and raw body text of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound calls needed by the dashboard. Non-success statuses are returned,
/// not raised; only failures to complete the exchange are errors.
pub trait Transport {
    /// POST a form-encoded body.
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<RawResponse>;

    /// POST a JSON body, optionally with a bearer token.
    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<RawResponse> {
        (**self).post_form(url, fields)
    }

    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse> {
        (**self).post_json(url, bearer, body)
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport. Without a timeout the client's default applies.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client, e.g. one carrying default auth headers.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<RawResponse> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()?;
        let status = resp.status().as_u16();
        Ok(RawResponse::new(status, resp.text()?))
    }

    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse> {
        let mut req = self.client.post(url).json(body);
        if let Some(token) = bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let resp = req.send()?;
        let status = resp.status().as_u16();
        Ok(RawResponse::new(status, resp.text()?))
    }
}
