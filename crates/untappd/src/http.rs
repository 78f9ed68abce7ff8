//! HTTP client abstraction for the Untappd API
//!
//! The API client builds complete requests and hands them to an `HttpClient`,
//! which performs the round trip and returns status, headers and the fully
//! read body. The trait keeps the transport swappable so tests can record
//! requests and serve canned responses.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::client::ResponseMeta;

/// A fully resolved request, ready to be sent
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Response from an HTTP request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Returns true if status is in 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the raw Content-Type header, if present and readable
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Deserializes the body as JSON; `null` members count as missing
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        crate::decode::from_json(&self.body)
    }

    /// Drops the body, keeping status and headers
    pub fn into_meta(self) -> ResponseMeta {
        ResponseMeta {
            status: self.status,
            headers: self.headers,
        }
    }
}

/// Trait for performing HTTP round trips
///
/// Implementations must read the whole body before returning, so the
/// connection is released on every path. Timeouts and cancellation are the
/// implementation's concern; its errors are surfaced to callers unchanged.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns the complete response
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new reqwest-based HTTP client
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wraps a preconfigured reqwest client, e.g. one with a timeout
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .inner
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.context("Failed to send request")?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Encodes key/value pairs as `application/x-www-form-urlencoded`
pub(crate) fn encode_form<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
